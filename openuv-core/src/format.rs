use std::fmt;

use crate::model::{SkinType, UvReport};

const MISSING: &str = "-";

/// Render a report as the fixed-layout text block shown to users.
///
/// Sun event times are right-aligned so that every value ends in the same
/// column; exposure minutes are laid out as skin types 1-3 beside 4-6.
pub fn format_report(report: &UvReport) -> String {
    report.to_string()
}

impl fmt::Display for UvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let t = &r.sun_info.sun_times;
        let st = &r.safe_exposure_time;

        writeln!(f, "UV Index:")?;
        writeln!(f, "  Current: {:6.2}", r.uv)?;
        writeln!(f, "  Max:     {:6.2}", r.uv_max)?;
        writeln!(f, "  Ozone:   {:6.2}", r.ozone)?;
        writeln!(f)?;

        writeln!(f, "Sunrise: {:>32}", or_missing(&t.sunrise))?;
        writeln!(f, "Solar Noon: {:>29}", or_missing(&t.solar_noon))?;
        writeln!(f, "Sunset: {:>33}", or_missing(&t.sunset))?;
        writeln!(f, "Night: {:>34}", or_missing(&t.night))?;
        writeln!(f, "Golden Hour: {:>28}", or_missing(&t.golden_hour))?;
        writeln!(f, "Morning GH ends: {}", or_missing(&t.golden_hour_end))?;
        writeln!(f)?;

        write!(f, "Safe Exposure Time [min]:")?;
        for (left, right) in [
            (SkinType::I, SkinType::IV),
            (SkinType::II, SkinType::V),
            (SkinType::III, SkinType::VI),
        ] {
            write!(
                f,
                "\n  {}: {:>2}   |   {}: {:>2}",
                left.index(),
                st.minutes(left),
                right.index(),
                st.minutes(right),
            )?;
        }

        Ok(())
    }
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::SAMPLE;

    fn sample() -> UvReport {
        UvReport::from_json(SAMPLE).expect("sample must decode")
    }

    #[test]
    fn pairs_skin_types_side_by_side() {
        let text = format_report(&sample());

        assert!(text.contains("1: 10   |   4: 30"), "{text}");
        assert!(text.contains("2: 15   |   5: 45"), "{text}");
        assert!(text.contains("3: 20   |   6: 60"), "{text}");
    }

    #[test]
    fn renders_full_layout() {
        let expected = "\
UV Index:
  Current:   3.50
  Max:       5.20
  Ozone:   300.10

Sunrise:                            06:00
Solar Noon:                         12:00
Sunset:                             18:00
Night:                              19:30
Golden Hour:                        17:00
Morning GH ends: 06:30

Safe Exposure Time [min]:
  1: 10   |   4: 30
  2: 15   |   5: 45
  3: 20   |   6: 60";

        assert_eq!(format_report(&sample()), expected);
    }

    #[test]
    fn missing_times_render_as_dash() {
        let report = UvReport::from_json(r#"{"result":{"uv":0.0}}"#).unwrap();
        let text = format_report(&report);

        assert!(text.contains("Morning GH ends: -"));
        assert!(text.lines().any(|l| l.starts_with("Sunrise:") && l.ends_with(" -")));
        assert!(text.contains("1:  0   |   4:  0"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn display_matches_format_report() {
        let report = sample();
        assert_eq!(format!("{report}"), format_report(&report));
    }
}
