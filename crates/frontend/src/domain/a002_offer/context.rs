use chrono::{Local, NaiveDateTime};
use contracts::domain::a002_offer::aggregate::{Offer, OfferDto, OfferId};
use contracts::domain::a002_offer::rules::active_offers;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use super::api::OffersApi;
use super::store::OfferStore;
use crate::shared::config::OFFER_CLOCK_MS;
use crate::shared::error::AppError;
use crate::shared::scheduler::{RepeatingTask, TimerCommand};

/// Offer list shared by the home page and its admin dialogs
#[derive(Clone, Copy)]
pub struct OfferContext {
    pub offers: RwSignal<Vec<Offer>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// Reference time of the date window, advanced by the provider's clock
    pub now: RwSignal<NaiveDateTime>,
    /// Offers whose window contains `now`, newest start first
    pub active: Memo<Vec<Offer>>,
}

impl OfferContext {
    pub fn new() -> Self {
        let offers = RwSignal::new(Vec::new());
        let now = RwSignal::new(Local::now().naive_local());
        Self {
            offers,
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            now,
            active: Memo::new(move |_| offers.with(|o| active_offers(o, now.get()))),
        }
    }

    pub fn is_active(&self, id: OfferId) -> bool {
        self.active.with_untracked(|a| a.iter().any(|o| o.id == id))
    }

    fn store() -> OfferStore<OffersApi> {
        OfferStore::new(OffersApi)
    }

    pub fn refresh(&self) {
        let ctx = *self;
        ctx.loading.set(true);
        spawn_local(async move {
            match Self::store().refresh().await {
                Ok(offers) => {
                    ctx.offers.set(offers);
                    ctx.error.set(None);
                }
                Err(e) => {
                    log::error!("offers: refresh failed: {}", e);
                    ctx.error.set(Some(e.user_message()));
                }
            }
            ctx.loading.set(false);
        });
    }

    fn accept(&self, result: Result<Vec<Offer>, AppError>) -> Result<(), AppError> {
        let offers = result?;
        self.offers.set(offers);
        self.error.set(None);
        Ok(())
    }

    pub async fn create(&self, token: &str, dto: &OfferDto, image: Option<&File>) -> Result<(), AppError> {
        self.accept(Self::store().create(token, dto, image).await)
    }

    pub async fn update(
        &self,
        token: &str,
        id: OfferId,
        dto: &OfferDto,
        image: Option<&File>,
    ) -> Result<(), AppError> {
        self.accept(Self::store().update(token, id, dto, image).await)
    }

    pub async fn delete(&self, token: &str, id: OfferId) -> Result<(), AppError> {
        self.accept(Self::store().delete(token, id).await)
    }

    pub async fn notify(&self, token: &str, ids: &[OfferId]) -> Result<(), AppError> {
        self.accept(Self::store().notify(token, ids).await)
    }
}

impl Default for OfferContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides the offer list and starts the first load
#[component]
pub fn OfferProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = OfferContext::new();
    ctx.refresh();

    // offers start and expire while the page stays open
    let clock = StoredValue::new_local(RepeatingTask::new(move || {
        ctx.now.set(Local::now().naive_local());
    }));
    clock.update_value(|t| t.apply(TimerCommand::Arm(OFFER_CLOCK_MS)));
    on_cleanup(move || clock.update_value(|t| t.apply(TimerCommand::Disarm)));

    provide_context(ctx);
    children()
}

pub fn use_offers() -> OfferContext {
    use_context::<OfferContext>().expect("OfferProvider not found in component tree")
}
