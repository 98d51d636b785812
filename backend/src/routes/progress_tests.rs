//! Wire-level tests for the progress payloads
//!
//! These exercise the derivation pipeline end to end without a database:
//! entry lists in, serialized response bodies out.

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;
    use weightline_shared::bmi::bmi_report;
    use weightline_shared::chart::{build_chart_series, ChartWindow, CHART_SLOTS};
    use weightline_shared::entry::{EntryPhoto, EntryType, WeightLogEntry};
    use weightline_shared::photos::recent_photos;
    use weightline_shared::stats::{compute_statistics, GoalWeight};
    use weightline_shared::types::{ApiResponse, ChartResponse, ProgressSummaryResponse};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weight_entry(weight: f64, log_date: NaiveDate, secs: i64) -> WeightLogEntry {
        WeightLogEntry {
            id: Uuid::new_v4(),
            entry_type: EntryType::Weight,
            weight_kg: Some(weight),
            log_date,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            photos: Vec::new(),
        }
    }

    fn photo_entry(log_date: NaiveDate, secs: i64, count: usize) -> WeightLogEntry {
        WeightLogEntry {
            id: Uuid::new_v4(),
            entry_type: EntryType::Photo,
            weight_kg: None,
            log_date,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            photos: (0..count)
                .map(|i| EntryPhoto {
                    file_name: format!("{log_date}-{i}.jpg"),
                    uri: format!("https://cdn.example.com/{log_date}-{i}.jpg"),
                })
                .collect(),
        }
    }

    // =========================================================================
    // Summary payload
    // =========================================================================

    #[test]
    fn summary_payload_carries_all_statistics_keys() {
        let entries = vec![
            weight_entry(80.0, date(2024, 6, 10), 3),
            weight_entry(85.0, date(2024, 5, 10), 2),
            weight_entry(90.0, date(2024, 4, 10), 1),
        ];
        let statistics = compute_statistics(
            &entries,
            Some(&GoalWeight::new("75.5")),
            date(2024, 6, 15),
        );
        let response = ApiResponse::success(ProgressSummaryResponse {
            statistics,
            bmi: None,
        });

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        for key in [
            "current_weight",
            "starting_weight",
            "goal_weight",
            "weight_lost",
            "weight_lost_30_days",
            "weight_lost_90_days",
        ] {
            assert!(body["data"].get(key).is_some(), "missing key {key}");
        }
        assert_eq!(body["data"]["current_weight"], 80.0);
        assert_eq!(body["data"]["goal_weight"], 75.5);
        assert!(body["data"].get("bmi").is_none());
    }

    #[test]
    fn summary_payload_includes_bmi_when_height_known() {
        let entries = vec![weight_entry(80.0, date(2024, 6, 10), 1)];
        let statistics = compute_statistics(&entries, None, date(2024, 6, 15));
        let bmi = bmi_report(statistics.current_weight, 175.0);
        assert!(bmi.is_some());

        let body = serde_json::to_value(ProgressSummaryResponse { statistics, bmi }).unwrap();
        assert!(body["bmi"]["value"].as_f64().unwrap() > 0.0);
        assert!(body["bmi"]["category"].is_string());
    }

    // =========================================================================
    // Chart payload
    // =========================================================================

    #[test]
    fn chart_payload_has_seven_aligned_slots() {
        let today = date(2024, 6, 12); // Wednesday
        let entries = vec![
            weight_entry(81.0, date(2024, 6, 10), 2),
            weight_entry(80.2, date(2024, 6, 12), 3),
        ];
        let window = ChartWindow::CalendarWeek;
        let response = ChartResponse {
            window,
            dates: window.dates(today),
            series: build_chart_series(&entries, window, today),
        };

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["window"], "calendar_week");
        assert_eq!(body["dates"].as_array().unwrap().len(), CHART_SLOTS);
        assert_eq!(body["series"].as_array().unwrap().len(), CHART_SLOTS);
        assert_eq!(body["dates"][0], "2024-06-09");
        assert_eq!(body["series"][1], 81.0);
        assert_eq!(body["series"][3], 80.2);
    }

    // =========================================================================
    // Photo feed payload
    // =========================================================================

    #[test]
    fn photo_feed_is_newest_first_and_capped() {
        let entries: Vec<WeightLogEntry> = (0..12)
            .map(|i| photo_entry(date(2024, 6, 1) + chrono::Duration::days(i), i, 1))
            .collect();

        let feed = recent_photos(&entries, 10);
        assert_eq!(feed.len(), 10);
        assert_eq!(feed[0].log_date, date(2024, 6, 12));

        let body = serde_json::to_value(&feed).unwrap();
        assert!(body[0]["file_name"].is_string());
        assert!(body[0]["uri"].is_string());
        assert_eq!(body[0]["log_date"], "2024-06-12");
    }

    // =========================================================================
    // Derivation chain properties
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Summary bodies survive a JSON round trip unchanged.
        #[test]
        fn prop_summary_round_trips_through_json(
            weights in prop::collection::vec(20.0f64..500.0, 0..20),
        ) {
            let entries: Vec<WeightLogEntry> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    weight_entry(*w, date(2024, 1, 1) + chrono::Duration::days(i as i64), i as i64)
                })
                .collect();
            let statistics = compute_statistics(&entries, None, date(2024, 12, 31));
            let response = ProgressSummaryResponse { statistics: statistics.clone(), bmi: None };

            let json = serde_json::to_string(&response).unwrap();
            let parsed: ProgressSummaryResponse = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed.statistics, statistics);
        }

        /// Chart bodies always carry exactly 7 finite values, whatever the log.
        #[test]
        fn prop_chart_body_is_always_full_width(
            weights in prop::collection::vec(20.0f64..500.0, 0..20),
            day_offsets in prop::collection::vec(0u32..30, 0..20),
        ) {
            let entries: Vec<WeightLogEntry> = weights
                .iter()
                .zip(day_offsets.iter())
                .enumerate()
                .map(|(i, (w, d))| {
                    weight_entry(*w, date(2024, 6, 1) + chrono::Duration::days(*d as i64), i as i64)
                })
                .collect();

            for window in [ChartWindow::CalendarWeek, ChartWindow::TrailingWeek] {
                let series = build_chart_series(&entries, window, date(2024, 6, 12));
                let body = serde_json::to_value(series).unwrap();
                let slots = body.as_array().unwrap();
                prop_assert_eq!(slots.len(), CHART_SLOTS);
                for slot in slots {
                    prop_assert!(slot.as_f64().unwrap().is_finite());
                }
            }
        }
    }
}
