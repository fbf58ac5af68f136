pub mod movie;
pub mod profile;

pub use movie::{
    Genre, Movie, MovieSummary, ProductionCompany, ProductionCountry, SpokenLanguage,
};
pub use profile::{Profile, ProfileUpdate};
