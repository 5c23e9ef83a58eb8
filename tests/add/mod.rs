mod adding_a_missing_file_fails;
mod adding_unchanged_content_unstages_the_file;
