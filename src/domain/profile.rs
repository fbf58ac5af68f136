use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub email: String,
    #[serde(rename = "profilePic")]
    pub profile_pic: String,
}

/// Field-wise edit; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub profile_pic: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.bio.is_none()
            && self.email.is_none()
            && self.profile_pic.is_none()
    }
}

impl Profile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(pic) = update.profile_pic {
            self.profile_pic = pic;
        }
    }

    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.username.is_empty() {
            &self.username
        } else {
            "(unnamed)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_pic_uses_camel_case_key() {
        let profile = Profile {
            profile_pic: "file:///tmp/me.png".into(),
            ..Profile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"profilePic\":\"file:///tmp/me.png\""));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email, "");
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut profile = Profile {
            name: "Ada".into(),
            bio: "math".into(),
            ..Profile::default()
        };
        profile.apply(ProfileUpdate {
            bio: Some("engines".into()),
            ..ProfileUpdate::default()
        });
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.bio, "engines");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = Profile::default();
        assert_eq!(profile.display_name(), "(unnamed)");
        profile.username = "ada".into();
        assert_eq!(profile.display_name(), "ada");
        profile.name = "Ada Lovelace".into();
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }
}
