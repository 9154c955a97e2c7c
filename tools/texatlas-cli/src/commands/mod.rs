pub mod import;
pub mod inspect;
pub mod probe;
pub mod reimport;
