//! Shared fixtures for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Card, CardId, Printing, RestrictionStatus};

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_hours(&self, hours: i64) {
        *self.lock_clock() += TimeDelta::hours(hours);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Build a card whose id is derived from its name.
pub fn card_with(name: &str, frame_category: &str, restriction: RestrictionStatus) -> Card {
    let digits: String = name
        .bytes()
        .map(|byte| char::from(b'0' + byte % 10))
        .take(8)
        .collect();
    Card {
        id: CardId::new(format!("9{digits}")).expect("valid fixture id"),
        name: name.to_owned(),
        category: if frame_category == "spell" {
            "Spell Card".to_owned()
        } else {
            "Effect Monster".to_owned()
        },
        frame_category: frame_category.to_owned(),
        restriction,
        printings: Vec::new(),
    }
}

/// Attach a printing to a card.
pub fn with_printing(mut card: Card, set_code: &str, set_name: &str) -> Card {
    card.printings.push(Printing {
        set_code: set_code.to_owned(),
        rarity: "Common".to_owned(),
        set_name: set_name.to_owned(),
    });
    card
}
