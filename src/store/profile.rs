use crate::app::Result;
use crate::domain::Profile;
use crate::store::KeyValueStore;

/// Key the profile JSON is stored under.
pub const PROFILE_KEY: &str = "userProfile";

/// Load the saved profile, or an empty one if none was saved yet.
pub fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> Result<Profile> {
    match store.get(PROFILE_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Profile::default()),
    }
}

pub fn save_profile<S: KeyValueStore + ?Sized>(store: &S, profile: &Profile) -> Result<()> {
    let raw = serde_json::to_string(profile)?;
    store.set(PROFILE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorKind;
    use crate::store::SqliteStore;

    #[test]
    fn test_load_without_saved_profile_is_default() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(load_profile(&store).unwrap(), Profile::default());
    }

    #[test]
    fn test_profile_round_trips_through_store() {
        let store = SqliteStore::in_memory().unwrap();
        let profile = Profile {
            name: "Ada Lovelace".into(),
            username: "ada".into(),
            bio: "First programmer".into(),
            email: "ada@example.com".into(),
            profile_pic: "file:///photos/ada.png".into(),
        };

        save_profile(&store, &profile).unwrap();
        assert_eq!(load_profile(&store).unwrap(), profile);
        assert!(store
            .get(PROFILE_KEY)
            .unwrap()
            .unwrap()
            .contains("\"profilePic\""));
    }

    #[test]
    fn test_corrupt_profile_is_parse_error() {
        let store = SqliteStore::in_memory().unwrap();
        store.set(PROFILE_KEY, "{not json").unwrap();

        let err = load_profile(&store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
