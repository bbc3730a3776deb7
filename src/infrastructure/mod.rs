pub mod jwt_token_generator;
