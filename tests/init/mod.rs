mod commands_require_an_initialized_repository;
mod init_creates_the_initial_commit;
mod init_twice_is_rejected;
