mod merge_clean;
