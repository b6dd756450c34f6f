// Cache key namespace.
// Derives collision-free keys from (platform, username, subroute) triples.

/// Platform segments used by the provider modules.
pub const GITHUB: &str = "github";
pub const LEETCODE: &str = "leetcode";
pub const WAKATIME: &str = "wakatime";

/// Return a key builder bound to one platform.
///
/// The produced closure formats `"<platform>:<username>:<subroute>"`. This is
/// the only place keys are constructed; provider modules hold one builder each
/// and never format keys by hand.
pub fn key_builder(platform: &'static str) -> impl Fn(&str, &str) -> String {
    move |username, subroute| format!("{platform}:{username}:{subroute}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let github_key = key_builder(GITHUB);
        assert_eq!(github_key("octocat", "stats"), "github:octocat:stats");
    }

    #[test]
    fn test_keys_stable_across_calls() {
        let waka_key = key_builder(WAKATIME);
        assert_eq!(waka_key("anna", "stats"), waka_key("anna", "stats"));
    }

    #[test]
    fn test_distinct_triples_produce_distinct_keys() {
        let github_key = key_builder(GITHUB);
        let leetcode_key = key_builder(LEETCODE);

        let keys = [
            github_key("octocat", "stats"),
            github_key("octocat", "streak"),
            github_key("monalisa", "stats"),
            leetcode_key("octocat", "stats"),
        ];

        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
