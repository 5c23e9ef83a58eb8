mod checkout_protects_untracked_files;
