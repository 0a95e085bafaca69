pub mod candidates;
pub mod health;
pub mod interviews;
pub mod rankings;
pub mod vacancies;
