mod find_matches_whole_messages;
