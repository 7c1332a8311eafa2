use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;

use godo_organiser::forms::{
    from_payload, is_step_ready, organisation_number_checksum_ok, to_payload, WizardStep,
};
use godo_organiser::models::draft::EventDraft;

fn luhn_check_digit(body: &[u32]) -> u32 {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                *d
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

fn render(digits: &[u32], dashed: bool) -> String {
    let plain: String = digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect();
    if dashed {
        format!("{}-{}", &plain[..6], &plain[6..])
    } else {
        plain
    }
}

fn single_date_draft(start: NaiveDate, days: i64, sh: u32, sm: u32, eh: u32, em: u32) -> EventDraft {
    EventDraft {
        organiser: "Jazzklubben".into(),
        title: "Jazz Night".into(),
        categories: vec![3],
        street_name: "Main St".into(),
        city: "Helsingborg".into(),
        postal_code: "25221".into(),
        start_date: Some(start),
        start_time: format!("{:02}:{:02}", sh, sm),
        end_date: Some(start + Duration::days(days)),
        end_time: format!("{:02}:{:02}", eh, em),
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn generated_organisation_numbers_pass(
        body in proptest::collection::vec(0_u32..10, 9),
        dashed in any::<bool>()
    ) {
        let mut digits = body.clone();
        digits.push(luhn_check_digit(&body));
        prop_assert!(organisation_number_checksum_ok(&render(&digits, dashed)));
    }

    #[test]
    fn single_digit_change_fails(
        body in proptest::collection::vec(0_u32..10, 9),
        position in 0_usize..10,
        delta in 1_u32..10
    ) {
        let mut digits = body.clone();
        digits.push(luhn_check_digit(&body));
        digits[position] = (digits[position] + delta) % 10;
        prop_assert!(!organisation_number_checksum_ok(&render(&digits, false)));
    }

    #[test]
    fn wrong_length_never_passes(digits in "[0-9]{0,9}|[0-9]{11,14}") {
        prop_assert!(!organisation_number_checksum_ok(&digits));
    }

    #[test]
    fn single_date_round_trip_restores_dates_and_times(
        offset in 0_i64..3650,
        days in 0_i64..30,
        sh in 0_u32..24, sm in 0_u32..60,
        eh in 0_u32..24, em in 0_u32..60
    ) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        let draft = single_date_draft(start, days, sh, sm, eh, em);
        let restored = from_payload(&to_payload(&draft));

        prop_assert_eq!(restored.start_date, draft.start_date);
        prop_assert_eq!(restored.end_date, draft.end_date);
        prop_assert_eq!(&restored.start_time, &draft.start_time);
        prop_assert_eq!(&restored.end_time, &draft.end_time);
        prop_assert_eq!(&restored.title, &draft.title);
    }

    #[test]
    fn payload_is_deterministic(
        offset in 0_i64..3650,
        sh in 0_u32..24, sm in 0_u32..60
    ) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        let draft = single_date_draft(start, 0, sh, sm, 23, 59);
        let first = serde_json::to_string(&to_payload(&draft)).unwrap();
        let second = serde_json::to_string(&to_payload(&draft)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn details_never_ready_without_categories(
        organiser in "[A-Za-z ]{1,40}",
        title in "[A-Za-z ]{1,80}"
    ) {
        let draft = EventDraft {
            organiser,
            title,
            categories: vec![],
            ..Default::default()
        };
        prop_assert!(!is_step_ready(WizardStep::Details, &draft));
    }
}

#[test]
fn known_organisation_numbers() {
    assert!(organisation_number_checksum_ok("5566778899"));
    assert!(organisation_number_checksum_ok("556677-8899"));
    assert!(organisation_number_checksum_ok("5560360793"));
    assert!(!organisation_number_checksum_ok("5566778898"));
    assert!(!organisation_number_checksum_ok("55667788AB"));
}
