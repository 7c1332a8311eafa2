//! Справочники кодов категорий, подкатегорий и тегов.
//!
//! Бэкенд является владельцем справочника, здесь только то, что нужно
//! для отображения и для мок-данных превью.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub code: u32,
    pub label: &'static str,
    pub label_sv: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subcategory {
    pub code: u32,
    pub category_code: u32,
    pub label: &'static str,
    pub label_sv: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub code: u32,
    pub label: &'static str,
    pub label_sv: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { code: 1, label: "Events", label_sv: "Evenemang" },
    Category { code: 2, label: "Sports & sporting activities", label_sv: "Idrott & sport" },
    Category { code: 3, label: "Entertainment", label_sv: "Underhållning" },
    Category { code: 4, label: "Culture & sights", label_sv: "Kultur & sevärdheter" },
    Category { code: 5, label: "Adventure & activities", label_sv: "Upplevelser & äventyr" },
    Category { code: 6, label: "Learn & explore", label_sv: "Lära & utforska" },
    Category { code: 7, label: "Health & wellbeing", label_sv: "Hälsa & välmående" },
];

pub const SUBCATEGORIES: &[Subcategory] = &[
    Subcategory { code: 101, category_code: 1, label: "Festivals & fun", label_sv: "Festivaler & skoj" },
    Subcategory { code: 102, category_code: 1, label: "Leisure & lifestyle", label_sv: "Fritid & livsstil" },
    Subcategory { code: 103, category_code: 1, label: "Fairs & markets", label_sv: "Mässor & marknader" },
    Subcategory { code: 201, category_code: 2, label: "Sports to do", label_sv: "Sport att utöva" },
    Subcategory { code: 202, category_code: 2, label: "Sports to watch", label_sv: "Sport att se på" },
    Subcategory { code: 203, category_code: 2, label: "Sports to try", label_sv: "Sport att prova" },
    Subcategory { code: 301, category_code: 3, label: "Cinema & film", label_sv: "Bio & film" },
    Subcategory { code: 302, category_code: 3, label: "Music & concerts", label_sv: "Musik & konserter" },
    Subcategory { code: 303, category_code: 3, label: "Theater & shows", label_sv: "Teater & shower" },
    Subcategory { code: 401, category_code: 4, label: "Guided tours", label_sv: "Guidade turer" },
    Subcategory { code: 402, category_code: 4, label: "Art & galleries", label_sv: "Konst & gallerier" },
    Subcategory { code: 403, category_code: 4, label: "Museums & sights", label_sv: "Museer & sevärdheter" },
    Subcategory { code: 501, category_code: 5, label: "Parks & trails", label_sv: "Parker & stigar" },
    Subcategory { code: 502, category_code: 5, label: "Food & drink activities", label_sv: "Mat & dryck" },
    Subcategory { code: 503, category_code: 5, label: "Trips & adventures", label_sv: "Utflykter & äventyr" },
    Subcategory { code: 601, category_code: 6, label: "Talks & lectures", label_sv: "Föreläsningar" },
    Subcategory { code: 602, category_code: 6, label: "Learn to…", label_sv: "Lär dig..." },
    Subcategory { code: 603, category_code: 6, label: "Gatherings & meetings", label_sv: "Träffar & möten" },
    Subcategory { code: 701, category_code: 7, label: "Spas & pools", label_sv: "Spa & bad" },
    Subcategory { code: 702, category_code: 7, label: "Support & interaction", label_sv: "Stöd & samverkan" },
    Subcategory { code: 703, category_code: 7, label: "Activities of faith", label_sv: "Trosaktiviteter" },
];

pub const TAGS: &[Tag] = &[
    Tag { code: 1001, label: "Free", label_sv: "Gratis" },
    Tag { code: 1002, label: "Family-friendly", label_sv: "Familjevänligt" },
    Tag { code: 1003, label: "Indoor", label_sv: "Inomhus" },
    Tag { code: 1004, label: "Outdoor", label_sv: "Utomhus" },
    Tag { code: 1005, label: "Senior focus", label_sv: "Seniorfokus" },
    Tag { code: 1006, label: "Wheelchair accessible", label_sv: "Rullstolsanpassat" },
];

pub fn category(code: u32) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.code == code)
}

pub fn subcategory(code: u32) -> Option<&'static Subcategory> {
    SUBCATEGORIES.iter().find(|s| s.code == code)
}

pub fn tag(code: u32) -> Option<&'static Tag> {
    TAGS.iter().find(|t| t.code == code)
}

/// Подкатегории одной категории в порядке справочника.
pub fn subcategories_of(category_code: u32) -> impl Iterator<Item = &'static Subcategory> {
    SUBCATEGORIES
        .iter()
        .filter(move |s| s.category_code == category_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_three_subcategories() {
        for c in CATEGORIES {
            assert_eq!(subcategories_of(c.code).count(), 3, "category {}", c.code);
        }
    }

    #[test]
    fn lookups_by_code() {
        assert_eq!(subcategory(302).map(|s| s.category_code), Some(3));
        assert_eq!(tag(1006).map(|t| t.label), Some("Wheelchair accessible"));
        assert!(category(8).is_none());
    }
}
