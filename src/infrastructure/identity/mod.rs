pub mod id_token_provider;
