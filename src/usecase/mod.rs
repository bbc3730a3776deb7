pub mod generate_token_usecase;
