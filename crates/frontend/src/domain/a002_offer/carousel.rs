//! Slide selection of the offers carousel.
//!
//! Pure state machine: the component feeds it events and applies the
//! returned [`TimerCommand`] to its `RepeatingTask`.

use crate::shared::config::CAROUSEL_INTERVAL_MS;
use crate::shared::scheduler::TimerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    Idle,
    Displaying { index: usize, auto_advancing: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    count: usize,
    index: usize,
    admin: bool,
    hovering: bool,
    interval_ms: u32,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(CAROUSEL_INTERVAL_MS)
    }
}

impl Carousel {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            count: 0,
            index: 0,
            admin: false,
            hovering: false,
            interval_ms,
        }
    }

    pub fn state(&self) -> CarouselState {
        if self.count == 0 {
            CarouselState::Idle
        } else {
            CarouselState::Displaying {
                index: self.index,
                auto_advancing: self.should_advance(),
            }
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn should_advance(&self) -> bool {
        !self.admin && self.count > 1 && !self.hovering
    }

    /// Timer command matching the current dependencies
    pub fn timer(&self) -> TimerCommand {
        if self.should_advance() {
            TimerCommand::Arm(self.interval_ms)
        } else {
            TimerCommand::Disarm
        }
    }

    /// New number of active offers; a different count restarts at the first slide
    pub fn set_count(&mut self, count: usize) -> TimerCommand {
        if count != self.count {
            self.count = count;
            self.index = 0;
        }
        self.timer()
    }

    pub fn set_admin(&mut self, admin: bool) -> TimerCommand {
        self.admin = admin;
        self.timer()
    }

    pub fn hover_enter(&mut self) -> TimerCommand {
        self.hovering = true;
        TimerCommand::Disarm
    }

    pub fn hover_leave(&mut self) -> TimerCommand {
        self.hovering = false;
        self.timer()
    }

    /// Interval elapsed. Returns whether the slide changed.
    pub fn tick(&mut self) -> bool {
        if !self.should_advance() {
            return false;
        }
        self.index = (self.index + 1) % self.count;
        true
    }

    pub fn next(&mut self) {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
    }

    pub fn prev(&mut self) {
        if self.count > 0 {
            self.index = (self.index + self.count - 1) % self.count;
        }
    }

    pub fn select(&mut self, index: usize) {
        if self.count > 0 {
            self.index = index % self.count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use contracts::domain::a002_offer::aggregate::{Offer, OfferDto, OfferId};
    use contracts::domain::a002_offer::rules::active_offers;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn offer(id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Offer {
        Offer {
            id: OfferId(id),
            data: OfferDto {
                title: Some(format!("Oferta {}", id)),
                description: String::new(),
                image_url: None,
                start_date: start,
                end_date: end,
                product_names: vec!["Aspirina".into()],
                discounts: Vec::new(),
                whatsapp_message: String::new(),
            },
        }
    }

    #[test]
    fn empty_carousel_is_idle_and_disarmed() {
        let mut c = Carousel::default();
        assert_eq!(c.state(), CarouselState::Idle);
        assert_eq!(c.set_count(0), TimerCommand::Disarm);
        c.next();
        c.prev();
        assert!(!c.tick());
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut c = Carousel::default();
        c.set_count(3);
        for _ in 0..7 {
            c.tick();
            assert!(c.index() < 3);
        }
        c.select(0);
        c.prev();
        assert_eq!(c.index(), 2);
        c.next();
        assert_eq!(c.index(), 0);
        c.select(5);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn admin_and_single_offer_never_advance() {
        let mut c = Carousel::default();
        assert_eq!(c.set_count(1), TimerCommand::Disarm);
        assert!(!c.tick());

        c.set_count(4);
        assert_eq!(c.set_admin(true), TimerCommand::Disarm);
        assert!(!c.tick());
        assert_eq!(c.index(), 0);
        assert_eq!(
            c.state(),
            CarouselState::Displaying {
                index: 0,
                auto_advancing: false
            }
        );

        c.next();
        assert_eq!(c.index(), 1);
        assert_eq!(c.hover_leave(), TimerCommand::Disarm);
    }

    #[test]
    fn hover_pauses_and_leave_rearms_full_interval() {
        let mut c = Carousel::default();
        c.set_count(2);
        assert_eq!(c.hover_enter(), TimerCommand::Disarm);
        assert!(!c.tick());
        assert_eq!(c.hover_leave(), TimerCommand::Arm(3500));
        assert!(c.tick());
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn count_change_resets_index() {
        let mut c = Carousel::default();
        c.set_count(3);
        c.select(2);
        c.set_count(3);
        assert_eq!(c.index(), 2);
        assert_eq!(c.set_count(2), TimerCommand::Arm(3500));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn expiry_while_open_resets_to_first_slide() {
        let offers = vec![
            offer(1, at(1, 0), at(10, 12)),
            offer(2, at(2, 0), at(20, 0)),
            offer(3, at(3, 0), at(20, 0)),
        ];
        let mut c = Carousel::default();
        c.set_count(active_offers(&offers, at(10, 11)).len());
        c.select(2);

        let later = at(10, 11) + Duration::hours(2);
        let still_active = active_offers(&offers, later);
        assert_eq!(still_active.len(), 2);
        assert_eq!(c.set_count(still_active.len()), TimerCommand::Arm(3500));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn offer_starting_while_open_joins_the_rotation() {
        let offers = vec![offer(1, at(1, 0), at(20, 0)), offer(2, at(5, 0), at(20, 0))];
        let mut c = Carousel::default();
        assert_eq!(c.set_count(active_offers(&offers, at(4, 23)).len()), TimerCommand::Disarm);
        assert_eq!(c.set_count(active_offers(&offers, at(5, 0)).len()), TimerCommand::Arm(3500));
        assert_eq!(c.count(), 2);
    }
}
