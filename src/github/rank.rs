// Rank-grade computation.
// Scores weighted activity totals against a normal CDF and buckets the result
// into a letter grade for the stats card.

use super::types::ActivityTotals;

const COMMITS_OFFSET: f64 = 1.65;
const CONTRIBS_OFFSET: f64 = 1.65;
const ISSUES_OFFSET: f64 = 1.0;
const STARS_OFFSET: f64 = 0.75;
const PRS_OFFSET: f64 = 0.5;
const FOLLOWERS_OFFSET: f64 = 0.45;
const REPO_OFFSET: f64 = 1.0;

// Commits are intentionally excluded from the offset total.
const ALL_OFFSETS: f64 =
    CONTRIBS_OFFSET + ISSUES_OFFSET + STARS_OFFSET + PRS_OFFSET + FOLLOWERS_OFFSET + REPO_OFFSET;

const RANK_S_PLUS_VALUE: f64 = 1.0;
const RANK_S_VALUE: f64 = 25.0;
const RANK_A_VALUE: f64 = 45.0;
const RANK_A2_VALUE: f64 = 60.0;
const RANK_B_VALUE: f64 = 100.0;

const TOTAL_VALUES: f64 =
    RANK_S_PLUS_VALUE + RANK_S_VALUE + RANK_A_VALUE + RANK_A2_VALUE + RANK_B_VALUE;

/// Normal cumulative distribution via the Abramowitz-Stegun erf approximation.
fn normal_cdf(mean: f64, sigma: f64, to: f64) -> f64 {
    let z = (to - mean) / (2.0 * sigma * sigma).sqrt();
    let t = 1.0 / (1.0 + 0.3275911 * z.abs());
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let erf = 1.0 - ((((a5 * t + a4) * t + a3) * t + a2) * t + a1) * t * (-z * z).exp();
    let sign = if z < 0.0 { -1.0 } else { 1.0 };
    0.5 * (1.0 + sign * erf)
}

/// Grade the given activity totals.
pub fn rank_grade(totals: &ActivityTotals) -> &'static str {
    let score = (totals.commits as f64 * COMMITS_OFFSET
        + totals.contributed_to as f64 * CONTRIBS_OFFSET
        + totals.issues as f64 * ISSUES_OFFSET
        + totals.stars as f64 * STARS_OFFSET
        + totals.prs as f64 * PRS_OFFSET
        + totals.followers as f64 * FOLLOWERS_OFFSET
        + totals.repos as f64 * REPO_OFFSET)
        / 100.0;

    let normalized = normal_cdf(score, TOTAL_VALUES, ALL_OFFSETS) * 100.0;

    if normalized < RANK_S_PLUS_VALUE {
        "S+"
    } else if normalized < RANK_S_VALUE {
        "S"
    } else if normalized < RANK_A_VALUE {
        "A++"
    } else if normalized < RANK_A2_VALUE {
        "A+"
    } else {
        "B+"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_activity_grades_a_plus() {
        assert_eq!(rank_grade(&ActivityTotals::default()), "A+");
    }

    #[test]
    fn test_heavy_activity_grades_higher() {
        let active = ActivityTotals {
            commits: 4_000,
            ..Default::default()
        };
        assert_eq!(rank_grade(&active), "A++");

        let prolific = ActivityTotals {
            commits: 12_000,
            ..Default::default()
        };
        assert_eq!(rank_grade(&prolific), "S");

        let legendary = ActivityTotals {
            commits: 1_000_000,
            ..Default::default()
        };
        assert_eq!(rank_grade(&legendary), "S+");
    }

    #[test]
    fn test_grade_is_deterministic() {
        let totals = ActivityTotals {
            commits: 730,
            stars: 42,
            prs: 15,
            issues: 8,
            contributed_to: 12,
            followers: 50,
            repos: 30,
        };
        assert_eq!(rank_grade(&totals), rank_grade(&totals));
    }
}
