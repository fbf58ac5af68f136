use serde::{Deserialize, Deserializer, Serialize};

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/600x400/1a1a1a/ffffff.png";
const POSTER_SIZE: &str = "w500";

/// One entry of a search or discover listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MovieSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            vote_average: 0.0,
            release_date: None,
            overview: None,
        }
    }

    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    pub fn poster_url(&self, image_base: &str) -> String {
        poster_url(image_base, self.poster_path.as_deref())
    }
}

/// Full detail record for a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: String,
    #[serde(default)]
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    #[serde(default)]
    pub iso_3166_1: String,
    pub name: String,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            overview: None,
            poster_path: None,
            release_date: None,
            runtime: None,
            vote_average: 0.0,
            vote_count: 0,
            genres: Vec::new(),
            budget: 0,
            revenue: 0,
            production_companies: Vec::new(),
            spoken_languages: Vec::new(),
            production_countries: Vec::new(),
            status: None,
            tagline: None,
            imdb_id: None,
        }
    }

    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    pub fn poster_url(&self, image_base: &str) -> String {
        poster_url(image_base, self.poster_path.as_deref())
    }

    /// Rating rounded to the nearest whole point, e.g. `"8/10"`.
    pub fn rating_label(&self) -> String {
        format!("{}/10", self.vote_average.round() as i64)
    }

    pub fn genre_names(&self) -> Option<String> {
        join_names(self.genres.iter().map(|g| g.name.as_str()), " • ")
    }

    pub fn company_names(&self) -> Option<String> {
        join_names(
            self.production_companies.iter().map(|c| c.name.as_str()),
            " • ",
        )
    }

    pub fn language_names(&self) -> Option<String> {
        join_names(
            self.spoken_languages.iter().map(|l| l.english_name.as_str()),
            ", ",
        )
    }

    pub fn country_names(&self) -> Option<String> {
        join_names(
            self.production_countries.iter().map(|c| c.name.as_str()),
            ", ",
        )
    }

    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.imdb.com/title/{}", id))
    }
}

fn release_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.split('-').next())
        .filter(|year| !year.is_empty())
}

fn poster_url(image_base: &str, poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) if !path.is_empty() => {
            format!("{}/{}{}", image_base.trim_end_matches('/'), POSTER_SIZE, path)
        }
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>, separator: &str) -> Option<String> {
    let joined = names.collect::<Vec<_>>().join(separator);
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// The API sends numeric ids; records keep them as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
