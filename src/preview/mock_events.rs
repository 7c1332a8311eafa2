//! Мок-события для превью мобильного приложения.
//!
//! По одному событию на каждую подкатегорию справочника; каждый тег
//! встречается минимум в пяти событиях. Даты начала считаются от
//! переданного "сегодня", поэтому превью всегда показывает будущее.

use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::forms::transform::to_local_iso_string;
use crate::models::catalog;
use crate::models::event::{CategoryDto, EventDto, EventTagDto, SubcategoryDto};

struct Seed {
    subcategory: u32,
    title: &'static str,
    description: &'static str,
    organiser: &'static str,
    street_name: &'static str,
    city: &'static str,
    postal_code: &'static str,
    days_from_now: i64,
    tags: &'static [u32],
}

const SEEDS: &[Seed] = &[
    Seed {
        subcategory: 101,
        title: "Sommarfestival på Sundstorget",
        description: "Helsingborgs stora sommarfestival med livemusik, street food och aktiviteter för hela familjen.",
        organiser: "Helsingborgs stad",
        street_name: "Sundstorget",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 5,
        tags: &[1001, 1004, 1002],
    },
    Seed {
        subcategory: 102,
        title: "Hälsomässan Helsingborg",
        description: "Hälsomässa med föreläsningar, provträning och utställare inom hälsa, kost och välmående.",
        organiser: "Helsingborg Arena",
        street_name: "Mellersta Stenbocksgatan 16",
        city: "Helsingborg",
        postal_code: "25437",
        days_from_now: 3,
        tags: &[1001, 1003, 1006],
    },
    Seed {
        subcategory: 103,
        title: "Julmarknad på Stortorget",
        description: "Traditionell julmarknad med glögg, pepparkakor, hantverk och julklappar.",
        organiser: "Helsingborgs stad",
        street_name: "Stortorget",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 2,
        tags: &[1004, 1002],
    },
    Seed {
        subcategory: 201,
        title: "Parkrun Helsingborg",
        description: "Gratis 5 km löpning varje lördag morgon i Pålsjö Skog. Alla välkomna oavsett tempo.",
        organiser: "Parkrun Sverige",
        street_name: "Pålsjö Skog",
        city: "Helsingborg",
        postal_code: "25225",
        days_from_now: 1,
        tags: &[1001, 1004],
    },
    Seed {
        subcategory: 202,
        title: "Helsingborg Marathon",
        description: "Årlig maratontävling med sträckor på 5 km, halvmaraton och fullt maraton.",
        organiser: "Helsingborg Marathon",
        street_name: "Hamntorget 1",
        city: "Helsingborg",
        postal_code: "25218",
        days_from_now: 22,
        tags: &[1004, 1006],
    },
    Seed {
        subcategory: 203,
        title: "Klätterkväll på Klättercentret",
        description: "Prova bouldering och topprepsklättring under kunnig ledning. Utrustning ingår.",
        organiser: "Klättercentret Helsingborg",
        street_name: "Garnisonsgatan 53",
        city: "Helsingborg",
        postal_code: "25466",
        days_from_now: 17,
        tags: &[1003, 1002],
    },
    Seed {
        subcategory: 301,
        title: "Barnfilmsdag på Röda Kvarn",
        description: "Animerade filmer och popcornfest för barn 3 till 10 år. Seniorer gratis.",
        organiser: "Filmstaden Helsingborg",
        street_name: "Bruksgatan 18",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 19,
        tags: &[1003, 1002, 1005],
    },
    Seed {
        subcategory: 302,
        title: "Jazz på Dunkers kulturhus",
        description: "Internationella och svenska jazzmusiker uppträder i Dunkers intima konsertsal.",
        organiser: "Dunkers kulturhus",
        street_name: "Kungsgatan 11",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 8,
        tags: &[1003, 1006],
    },
    Seed {
        subcategory: 303,
        title: "Hamlet på Helsingborgs Stadsteater",
        description: "Shakespeares klassiker i modern tappning. Rullstolsplatser finns i salongen.",
        organiser: "Helsingborgs Stadsteater",
        street_name: "Karl Johans gata 1",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 5,
        tags: &[1003, 1006],
    },
    Seed {
        subcategory: 401,
        title: "Historisk stadsvandring i Helsingborg",
        description: "Guidad vandring genom Helsingborgs 900-åriga historia, från Kärnan till hamnen.",
        organiser: "Helsingborgs Turistbyrå",
        street_name: "Stortorget 17",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 1,
        tags: &[1004, 1005],
    },
    Seed {
        subcategory: 402,
        title: "Konstnatt Helsingborg",
        description: "Gallerier och ateljéer i hela staden håller öppet en kväll. Gratis entré.",
        organiser: "Helsingborgs Konstförening",
        street_name: "Stortorget 17",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 9,
        tags: &[1001, 1003],
    },
    Seed {
        subcategory: 403,
        title: "Maritiman, sjöfartshistoria",
        description: "Sjöfartsmuseum med historiska fartyg, navigationsinstrument och berättelser om Öresund.",
        organiser: "Helsingborgs museer",
        street_name: "Hamntorget 1",
        city: "Helsingborg",
        postal_code: "25218",
        days_from_now: 20,
        tags: &[1003, 1005],
    },
    Seed {
        subcategory: 501,
        title: "Promenad i Fredriksdals trädgårdar",
        description: "Botanisk vandring med expert som berättar om växter och historiska odlingsmetoder.",
        organiser: "Fredriksdals museer och trädgårdar",
        street_name: "Gisela Trapps väg 1",
        city: "Helsingborg",
        postal_code: "25431",
        days_from_now: 8,
        tags: &[1004, 1005],
    },
    Seed {
        subcategory: 502,
        title: "Helsingborg Food Walk",
        description: "Kulinarisk stadsvandring med smakprov på fem restauranger i centrala Helsingborg.",
        organiser: "Helsingborg Food Tours",
        street_name: "Stortorget 17",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 5,
        tags: &[1004],
    },
    Seed {
        subcategory: 503,
        title: "Äventyrsparken, klätterbana i skogen",
        description: "Höghöjdsbanor bland trädtopparna för alla från 4 år. Säkerhetsutrustning ingår.",
        organiser: "Äventyrsparken Skåne",
        street_name: "Rååvägen 10",
        city: "Helsingborg",
        postal_code: "25265",
        days_from_now: 22,
        tags: &[1004, 1002],
    },
    Seed {
        subcategory: 601,
        title: "Föreläsning: Hållbar stadsutveckling",
        description: "Om framtidens hållbara stadsplanering med exempel från H22-projektet. Fri entré.",
        organiser: "Campus Helsingborg",
        street_name: "Universitetsplatsen 2",
        city: "Helsingborg",
        postal_code: "25148",
        days_from_now: 2,
        tags: &[1003, 1001],
    },
    Seed {
        subcategory: 602,
        title: "Keramikverkstad på Kulturhuset",
        description: "Lär dig grunderna i keramik och dreja din egen skål. Material och bränning ingår.",
        organiser: "Dunkers kulturhus",
        street_name: "Kungsgatan 11",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 4,
        tags: &[1003],
    },
    Seed {
        subcategory: 603,
        title: "Bokcirkel på Stadsbiblioteket",
        description: "Månadens bok diskuteras i bibliotekets läshörna. Kaffe serveras.",
        organiser: "Stadsbiblioteket Helsingborg",
        street_name: "Bollbrogatan 1",
        city: "Helsingborg",
        postal_code: "25220",
        days_from_now: 17,
        tags: &[1003, 1005],
    },
    Seed {
        subcategory: 701,
        title: "Kallbadhuset, bastu och havsbad",
        description: "Traditionellt kallbad med bastu och utsikt mot Danmark. Rullstolsanpassat.",
        organiser: "Pålsjöbaden",
        street_name: "Pålsjövägen",
        city: "Helsingborg",
        postal_code: "25225",
        days_from_now: 3,
        tags: &[1004, 1006],
    },
    Seed {
        subcategory: 702,
        title: "Föräldraträff på Familjecentralen",
        description: "Öppen träff för nyblivna föräldrar med barn 0 till 1 år. Fika ingår.",
        organiser: "Familjecentralen Helsingborg",
        street_name: "Drottninggatan 14",
        city: "Helsingborg",
        postal_code: "25221",
        days_from_now: 5,
        tags: &[1003, 1002, 1006],
    },
    Seed {
        subcategory: 703,
        title: "Mindfulness-meditation i Stadsparken",
        description: "Gratis guidad meditation utomhus varje söndagsmorgon. Passar alla nivåer.",
        organiser: "Meditationsgruppen Helsingborg",
        street_name: "Stadsparken",
        city: "Helsingborg",
        postal_code: "25234",
        days_from_now: 2,
        tags: &[1001, 1004],
    },
];

/// Мок-события с датами относительно сегодняшнего дня.
pub fn mock_events() -> Vec<EventDto> {
    mock_events_from(Local::now().date_naive())
}

pub fn mock_events_from(today: NaiveDate) -> Vec<EventDto> {
    let created_at = to_local_iso_string(today.and_time(NaiveTime::MIN));
    SEEDS
        .iter()
        .enumerate()
        .filter_map(|(i, seed)| build_event(i + 1, seed, today, &created_at))
        .collect()
}

fn build_event(n: usize, seed: &Seed, today: NaiveDate, created_at: &str) -> Option<EventDto> {
    let sub = catalog::subcategory(seed.subcategory)?;
    let cat = catalog::category(sub.category_code)?;
    let start = (today + Duration::days(seed.days_from_now))
        .and_hms_opt(10, 0, 0)
        .map(to_local_iso_string);

    Some(EventDto {
        id: format!("mock-{:03}", n),
        organiser: seed.organiser.to_string(),
        organisation_number: String::new(),
        title: seed.title.to_string(),
        description: Some(seed.description.to_string()),
        event_url: None,
        booking_url: None,
        street_name: seed.street_name.to_string(),
        street_name2: None,
        house_number: None,
        city: seed.city.to_string(),
        postal_code: seed.postal_code.to_string(),
        gps_coordinates: None,
        has_single_dates: Some(true),
        start_date: start,
        end_date: None,
        has_schedule: Some(false),
        weekday: None,
        schedule_start_time: None,
        schedule_end_time: None,
        recurrence: None,
        is_always_open: Some(false),
        spotlight: Some(false),
        spotlight_start_date: None,
        spotlight_end_date: None,
        is_active: true,
        created_at: created_at.to_string(),
        updated_at: None,
        created_by_id: None,
        source_provider: Some(if seed.city == "Helsingborg" { "helsingborg" } else { "internal" }.to_string()),
        categories: vec![CategoryDto {
            code: cat.code,
            name: cat.label.to_string(),
            name_sv: cat.label_sv.to_string(),
        }],
        subcategories: vec![SubcategoryDto {
            code: sub.code,
            name: sub.label.to_string(),
            name_sv: sub.label_sv.to_string(),
            category_code: cat.code,
        }],
        tags: seed
            .tags
            .iter()
            .filter_map(|code| catalog::tag(*code))
            .map(|t| EventTagDto {
                code: t.code,
                name: t.label_sv.to_string(),
            })
            .collect(),
    })
}
