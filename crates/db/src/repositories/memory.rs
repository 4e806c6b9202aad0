use std::collections::HashMap;

use tokio::sync::RwLock;

use safari_core::domain::booking::{Booking, BookingId};
use safari_core::domain::inquiry::{ContactInquiry, NewsletterSubscription, SubscribeOutcome};
use safari_core::domain::package::{Package, PackageId};
use safari_core::domain::review::{Review, ReviewId};

use super::{
    BookingRepository, ContactInquiryRepository, NewsletterRepository, PackageRepository,
    RepositoryError, ReviewRepository,
};

/// Keyed by package id; the `u64` is the catalog position assigned on first save.
#[derive(Default)]
pub struct InMemoryPackageRepository {
    packages: RwLock<HashMap<String, (u64, Package)>>,
}

impl InMemoryPackageRepository {
    pub fn with_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let mut by_id = HashMap::new();
        for (position, package) in packages.into_iter().enumerate() {
            by_id.entry(package.id.0.clone()).or_insert((position as u64 + 1, package));
        }
        Self { packages: RwLock::new(by_id) }
    }
}

#[async_trait::async_trait]
impl PackageRepository for InMemoryPackageRepository {
    async fn list_active(&self) -> Result<Vec<Package>, RepositoryError> {
        let packages = self.packages.read().await;
        let mut active = packages
            .values()
            .filter(|(_, package)| package.active)
            .map(|(position, package)| (*position, package.clone()))
            .collect::<Vec<_>>();
        active.sort_by(|(left_pos, left), (right_pos, right)| {
            left_pos.cmp(right_pos).then_with(|| left.slug.cmp(&right.slug))
        });
        Ok(active.into_iter().map(|(_, package)| package).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Package>, RepositoryError> {
        let packages = self.packages.read().await;
        Ok(packages.values().find(|(_, package)| package.slug == slug).map(|(_, p)| p.clone()))
    }

    async fn save(&self, package: Package) -> Result<(), RepositoryError> {
        let mut packages = self.packages.write().await;
        let next_position = packages.values().map(|(position, _)| *position).max().unwrap_or(0) + 1;
        let position =
            packages.get(&package.id.0).map(|(position, _)| *position).unwrap_or(next_position);
        packages.insert(package.id.0.clone(), (position, package));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<String, Booking>>,
}

#[async_trait::async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: Booking) -> Result<(), RepositoryError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id.0) {
            return Err(RepositoryError::Decode(format!(
                "booking `{}` already exists",
                booking.id.0
            )));
        }
        bookings.insert(booking.id.0.clone(), booking);
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id.0).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: RwLock<HashMap<String, Review>>,
}

#[async_trait::async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn list_approved(&self, package_id: &PackageId) -> Result<Vec<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        let mut approved = reviews
            .values()
            .filter(|review| review.approved && review.package_id == *package_id)
            .cloned()
            .collect::<Vec<_>>();
        approved.sort_by(|left, right| {
            right.created_at.cmp(&left.created_at).then_with(|| left.id.0.cmp(&right.id.0))
        });
        Ok(approved)
    }

    async fn create(&self, mut review: Review) -> Result<(), RepositoryError> {
        review.approved = false;
        let mut reviews = self.reviews.write().await;
        reviews.insert(review.id.0.clone(), review);
        Ok(())
    }

    async fn approve(&self, id: &ReviewId) -> Result<bool, RepositoryError> {
        let mut reviews = self.reviews.write().await;
        Ok(reviews.get_mut(&id.0).map(|review| review.approved = true).is_some())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id.0).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryNewsletterRepository {
    subscribers: RwLock<HashMap<String, NewsletterSubscription>>,
}

#[async_trait::async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn subscribe(
        &self,
        subscription: NewsletterSubscription,
    ) -> Result<SubscribeOutcome, RepositoryError> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&subscription.email) {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        subscribers.insert(subscription.email.clone(), subscription);
        Ok(SubscribeOutcome::Subscribed)
    }
}

#[derive(Default)]
pub struct InMemoryContactInquiryRepository {
    inquiries: RwLock<Vec<ContactInquiry>>,
}

impl InMemoryContactInquiryRepository {
    pub async fn all(&self) -> Vec<ContactInquiry> {
        self.inquiries.read().await.clone()
    }
}

#[async_trait::async_trait]
impl ContactInquiryRepository for InMemoryContactInquiryRepository {
    async fn create(&self, inquiry: ContactInquiry) -> Result<(), RepositoryError> {
        self.inquiries.write().await.push(inquiry);
        Ok(())
    }
}
