pub mod match_repo;
