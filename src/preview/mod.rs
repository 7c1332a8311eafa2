//! Превью мобильного приложения на мок-данных.
//!
//! Фильтр повторяет поведение экрана результатов: категории и
//! подкатегории совпадают по принципу "любая из", теги по принципу
//! "все сразу".

pub mod mock_events;

use std::cmp::Ordering;

use crate::forms::transform::parse_timestamp;
use crate::models::event::EventDto;

pub use mock_events::{mock_events, mock_events_from};

pub const DEFAULT_PREVIEW_PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockFilter {
    pub category_codes: Vec<u32>,
    pub subcategory_codes: Vec<u32>,
    pub tag_codes: Vec<u32>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockPage {
    pub items: Vec<EventDto>,
    /// Число совпадений до обрезки по размеру страницы.
    pub total_count: usize,
}

pub fn filter_mock_events(filter: &MockFilter) -> MockPage {
    filter_events(mock_events(), filter)
}

pub fn filter_events(events: Vec<EventDto>, filter: &MockFilter) -> MockPage {
    let mut matched: Vec<EventDto> = events
        .into_iter()
        .filter(|e| matches_filter(e, filter))
        .collect();

    // sort_by стабильна: равные даты сохраняют исходный порядок
    matched.sort_by(|a, b| compare_start(a, b));

    let total_count = matched.len();
    matched.truncate(filter.page_size.unwrap_or(DEFAULT_PREVIEW_PAGE_SIZE));
    MockPage {
        items: matched,
        total_count,
    }
}

fn matches_filter(event: &EventDto, filter: &MockFilter) -> bool {
    let category_ok = filter.category_codes.is_empty()
        || event
            .categories
            .iter()
            .any(|c| filter.category_codes.contains(&c.code));
    let subcategory_ok = filter.subcategory_codes.is_empty()
        || event
            .subcategories
            .iter()
            .any(|s| filter.subcategory_codes.contains(&s.code));
    let tags_ok = filter
        .tag_codes
        .iter()
        .all(|code| event.tags.iter().any(|t| t.code == *code));

    category_ok && subcategory_ok && tags_ok
}

/// События без даты начала уходят в конец.
fn compare_start(a: &EventDto, b: &EventDto) -> Ordering {
    let a = a.start_date.as_deref().and_then(parse_timestamp);
    let b = b.start_date.as_deref().and_then(parse_timestamp);
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn events() -> Vec<EventDto> {
        mock_events_from(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn tags_must_all_match() {
        let filter = MockFilter {
            tag_codes: vec![1001, 1004],
            ..Default::default()
        };
        let page = filter_events(events(), &filter);
        assert!(page.total_count > 0);
        for e in &page.items {
            assert!(e.tags.iter().any(|t| t.code == 1001));
            assert!(e.tags.iter().any(|t| t.code == 1004));
        }
        // Фестиваль, Parkrun и медитация
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn categories_match_any_of() {
        let filter = MockFilter {
            category_codes: vec![2, 7],
            ..Default::default()
        };
        assert_eq!(filter_events(events(), &filter).total_count, 6);
    }

    #[test]
    fn results_are_sorted_by_start_date() {
        let page = filter_events(events(), &MockFilter::default());
        let starts: Vec<_> = page
            .items
            .iter()
            .map(|e| e.start_date.clone().unwrap())
            .collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(page.items[0].title, "Parkrun Helsingborg");
    }

    #[test]
    fn missing_start_dates_go_last() {
        let mut all = events();
        all[0].start_date = None;
        let undated_id = all[0].id.clone();
        let page = filter_events(all, &MockFilter::default());
        assert_eq!(page.items.last().map(|e| e.id.clone()), Some(undated_id));
    }

    #[test]
    fn page_size_caps_items_but_not_total() {
        let filter = MockFilter {
            page_size: Some(5),
            ..Default::default()
        };
        let page = filter_events(events(), &filter);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_count, 21);
    }
}
