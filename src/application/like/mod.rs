pub mod count_animator;
pub mod dto;
pub mod use_case;
