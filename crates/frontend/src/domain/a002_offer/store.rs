//! Offer list orchestration: every mutation is validated locally, sent, and
//! followed by a full reload, so callers always get the backend's list.

use async_trait::async_trait;
use contracts::domain::a002_offer::aggregate::{Offer, OfferDto, OfferId};

use crate::shared::error::AppError;

/// Offer endpoints the store needs
#[async_trait(?Send)]
pub trait OfferSource {
    /// Uploaded banner file
    type Upload;

    async fn list(&self) -> Result<Vec<Offer>, AppError>;
    async fn create(
        &self,
        token: &str,
        dto: &OfferDto,
        image: Option<&Self::Upload>,
    ) -> Result<(), AppError>;
    async fn update(
        &self,
        token: &str,
        id: OfferId,
        dto: &OfferDto,
        image: Option<&Self::Upload>,
    ) -> Result<(), AppError>;
    async fn delete(&self, token: &str, id: OfferId) -> Result<(), AppError>;
    async fn notify(&self, token: &str, ids: &[OfferId]) -> Result<(), AppError>;
}

pub struct OfferStore<A: OfferSource> {
    source: A,
}

impl<A: OfferSource> OfferStore<A> {
    pub fn new(source: A) -> Self {
        Self { source }
    }

    pub async fn refresh(&self) -> Result<Vec<Offer>, AppError> {
        let offers = self.source.list().await?;
        log::info!("offers: loaded {}", offers.len());
        Ok(offers)
    }

    pub async fn create(
        &self,
        token: &str,
        dto: &OfferDto,
        image: Option<&A::Upload>,
    ) -> Result<Vec<Offer>, AppError> {
        dto.validate_with_upload(image.is_some())
            .map_err(AppError::Validation)?;
        self.source.create(token, dto, image).await?;
        self.refresh().await
    }

    pub async fn update(
        &self,
        token: &str,
        id: OfferId,
        dto: &OfferDto,
        image: Option<&A::Upload>,
    ) -> Result<Vec<Offer>, AppError> {
        dto.validate_with_upload(image.is_some())
            .map_err(AppError::Validation)?;
        self.source.update(token, id, dto, image).await?;
        self.refresh().await
    }

    pub async fn delete(&self, token: &str, id: OfferId) -> Result<Vec<Offer>, AppError> {
        self.source.delete(token, id).await?;
        self.refresh().await
    }

    pub async fn notify(&self, token: &str, ids: &[OfferId]) -> Result<Vec<Offer>, AppError> {
        if ids.is_empty() {
            return Err(AppError::validation("Selecciona al menos una oferta"));
        }
        self.source.notify(token, ids).await?;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, NaiveTime};
    use contracts::domain::a002_offer::aggregate::ProductDiscount;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeOffers {
        offers: RefCell<Vec<Offer>>,
        writes: Cell<usize>,
        lists: Cell<usize>,
        notified: RefCell<Vec<OfferId>>,
    }

    #[async_trait(?Send)]
    impl OfferSource for FakeOffers {
        type Upload = ();

        async fn list(&self) -> Result<Vec<Offer>, AppError> {
            self.lists.set(self.lists.get() + 1);
            Ok(self.offers.borrow().clone())
        }

        async fn create(&self, _token: &str, dto: &OfferDto, _image: Option<&()>) -> Result<(), AppError> {
            self.writes.set(self.writes.get() + 1);
            let id = OfferId(self.offers.borrow().len() as i64 + 1);
            self.offers.borrow_mut().push(Offer {
                id,
                data: dto.clone(),
            });
            Ok(())
        }

        async fn update(
            &self,
            _token: &str,
            id: OfferId,
            dto: &OfferDto,
            _image: Option<&()>,
        ) -> Result<(), AppError> {
            self.writes.set(self.writes.get() + 1);
            let mut offers = self.offers.borrow_mut();
            match offers.iter_mut().find(|o| o.id == id) {
                Some(o) => {
                    o.data = dto.clone();
                    Ok(())
                }
                None => Err(AppError::Http {
                    status: 404,
                    message: String::new(),
                }),
            }
        }

        async fn delete(&self, _token: &str, id: OfferId) -> Result<(), AppError> {
            self.writes.set(self.writes.get() + 1);
            self.offers.borrow_mut().retain(|o| o.id != id);
            Ok(())
        }

        async fn notify(&self, _token: &str, ids: &[OfferId]) -> Result<(), AppError> {
            self.notified.borrow_mut().extend_from_slice(ids);
            Ok(())
        }
    }

    fn summer_offer(days: i64) -> OfferDto {
        let today = Local::now().date_naive();
        OfferDto {
            title: Some("Verano".into()),
            description: String::new(),
            image_url: None,
            start_date: today.and_time(NaiveTime::MIN),
            end_date: (today + Duration::days(days))
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            product_names: vec!["Aspirina".into()],
            discounts: vec![ProductDiscount {
                product_name: "Aspirina".into(),
                discount_percentage: 20,
            }],
            whatsapp_message: String::new(),
        }
    }

    #[test]
    fn created_offer_shows_up_after_refresh() {
        let store = OfferStore::new(FakeOffers::default());
        let mut dto = summer_offer(7);
        dto.whatsapp_message = dto.whatsapp_message();

        let offers = block_on(store.create("t", &dto, None)).unwrap();
        assert_eq!(store.source.lists.get(), 1);
        let created = offers
            .iter()
            .find(|o| o.title.as_deref() == Some("Verano"))
            .unwrap();
        assert!(!created.is_image_offer());
        assert!(created.whatsapp_message.contains("Verano"));
        assert!(created.whatsapp_message.contains("Aspirina: 20%"));
    }

    #[test]
    fn end_not_after_start_never_reaches_backend() {
        let store = OfferStore::new(FakeOffers::default());
        let mut dto = summer_offer(0);
        dto.end_date = dto.start_date;
        let err = block_on(store.create("t", &dto, None)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        dto.end_date = dto.start_date - Duration::days(1);
        assert!(block_on(store.update("t", OfferId(1), &dto, None)).is_err());

        assert_eq!(store.source.writes.get(), 0);
        assert_eq!(store.source.lists.get(), 0);
    }

    #[test]
    fn upload_satisfies_banner_requirement() {
        let store = OfferStore::new(FakeOffers::default());
        let mut dto = summer_offer(3);
        dto.title = None;
        assert!(block_on(store.create("t", &dto, None)).is_err());
        assert!(block_on(store.create("t", &dto, Some(&()))).is_ok());
    }

    #[test]
    fn delete_and_notify_refresh_the_list() {
        let store = OfferStore::new(FakeOffers::default());
        block_on(store.create("t", &summer_offer(2), None)).unwrap();
        block_on(store.create("t", &summer_offer(4), None)).unwrap();

        let after_notify = block_on(store.notify("t", &[OfferId(2)])).unwrap();
        assert_eq!(after_notify.len(), 2);
        assert_eq!(*store.source.notified.borrow(), vec![OfferId(2)]);

        let after_delete = block_on(store.delete("t", OfferId(1))).unwrap();
        assert_eq!(after_delete.len(), 1);
        assert_eq!(store.source.lists.get(), 4);
    }

    #[test]
    fn notify_requires_a_selection() {
        let store = OfferStore::new(FakeOffers::default());
        assert!(block_on(store.notify("t", &[])).is_err());
    }
}
