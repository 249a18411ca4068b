pub mod corpus;
pub mod embedding;
pub mod providers;
pub mod search;
pub mod semantic;
