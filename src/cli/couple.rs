//! Compatibility report for two saved profiles.

use std::path::Path;

use anyhow::Context;
use kindred::{CoupleCompatibility, PartnerProfile, calculate_compatibility};

pub fn run_couple(partner1: &Path, partner2: &Path) -> anyhow::Result<()> {
    let report = couple_report(partner1, partner2)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn couple_report(partner1: &Path, partner2: &Path) -> anyhow::Result<CoupleCompatibility> {
    let first = load_partner(partner1)?;
    let second = load_partner(partner2)?;
    Ok(calculate_compatibility(&first, &second))
}

fn load_partner(path: &Path) -> anyhow::Result<PartnerProfile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read partner profile {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid partner profile {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred::DimensionScores;

    fn write_partner(dir: &Path, name: &str, values: [u8; 8]) -> std::path::PathBuf {
        let path = dir.join(format!("{name}.json"));
        let profile = PartnerProfile::new(name, DimensionScores::new(values));
        std::fs::write(&path, serde_json::to_string(&profile).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_report_from_saved_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let alex = write_partner(dir.path(), "Alex", [85, 60, 50, 50, 50, 50, 50, 50]);
        let sam = write_partner(dir.path(), "Sam", [25, 60, 50, 50, 50, 50, 50, 50]);

        let report = couple_report(&alex, &sam).unwrap();
        assert_eq!(report.partner1, "Alex");
        assert_eq!(report.partner2, "Sam");
        assert_eq!(report.power_balance.leader.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_malformed_profile_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"name\": 3}").unwrap();
        let err = load_partner(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
