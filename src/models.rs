use serde::{Deserialize, Serialize};

// GitHub users API response - only the fields we care about.
// Everything else the upstream sends is dropped on deserialize,
// which is what keeps unvetted fields out of our responses.
#[derive(Deserialize, Clone, Debug)]
pub struct GithubUser {
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub avatar_url: Option<String>,
}

// What we actually return to callers
#[derive(Serialize, Clone, Debug)]
pub struct ProfileView {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub avatar_url: Option<String>,
}

impl From<GithubUser> for ProfileView {
    fn from(user: GithubUser) -> Self {
        Self {
            name: user.name,
            bio: user.bio,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            avatar_url: user.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_upstream_fields_are_dropped() {
        let payload = json!({
            "login": "octocat",
            "id": 583231,
            "node_id": "MDQ6VXNlcjU4MzIzMQ==",
            "name": "The Octocat",
            "bio": null,
            "company": "@github",
            "email": "octocat@github.com",
            "public_repos": 8,
            "followers": 9999,
            "following": 9,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231"
        });

        let user: GithubUser = serde_json::from_value(payload).unwrap();
        let view = ProfileView::from(user);

        let out = serde_json::to_value(&view).unwrap();
        let mut keys: Vec<&str> = out.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["avatar_url", "bio", "followers", "following", "name", "public_repos"]
        );
        assert_eq!(out["name"], "The Octocat");
        assert_eq!(out["bio"], serde_json::Value::Null);
        assert_eq!(out["public_repos"], 8);
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let user: GithubUser = serde_json::from_value(json!({
            "name": "someone",
            "bio": "hi",
            "avatar_url": "https://example.com/a.png"
        }))
        .unwrap();
        assert_eq!(user.public_repos, 0);
        assert_eq!(user.followers, 0);
        assert_eq!(user.following, 0);
    }
}
