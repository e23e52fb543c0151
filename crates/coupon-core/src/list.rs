// ── Coupon list coordinator ──
//
// Owns the list view's page state. Fetches are keyed by the `PageQuery`
// they were issued for; a response is applied only if that query is still
// the current target, so a slow response for an older page never
// overwrites a newer one. State is published through a `watch` channel
// and replaced wholesale on every successful fetch.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::CouponApi;
use crate::error::CoreError;
use crate::model::Coupon;
use crate::notice::Notice;
use crate::pagination::{Page, PageQuery};

/// Renderable list state: page metadata plus its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListView {
    pub page: Page,
    pub coupons: Vec<Coupon>,
}

/// What happened to a fetch's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the view.
    Applied,
    /// A newer target was requested meanwhile; the response was discarded.
    Stale,
    /// The coordinator was closed; nothing was applied.
    Closed,
}

/// Result of a delete: the backend's confirmation and the follow-up refetch.
#[derive(Debug)]
pub struct Deleted {
    pub notice: Notice,
    pub refresh: Result<FetchOutcome, CoreError>,
}

pub struct CouponListCoordinator {
    api: Arc<dyn CouponApi>,
    view: watch::Sender<ListView>,
    target: watch::Sender<Option<PageQuery>>,
    cancel: CancellationToken,
}

impl CouponListCoordinator {
    pub fn new(api: Arc<dyn CouponApi>) -> Self {
        let (view, _) = watch::channel(ListView::default());
        let (target, _) = watch::channel(None);
        Self {
            api,
            view,
            target,
            cancel: CancellationToken::new(),
        }
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ListView {
        self.view.borrow().clone()
    }

    /// Receive a notification every time the view is replaced.
    pub fn subscribe(&self) -> watch::Receiver<ListView> {
        self.view.subscribe()
    }

    /// The most recently requested page, if any fetch was issued.
    pub fn target(&self) -> Option<PageQuery> {
        *self.target.borrow()
    }

    /// Fetch the page described by `url`, unless it is already the target.
    ///
    /// Returns `Ok(None)` when the effective page/limit did not change.
    pub async fn sync_with_url(&self, url: &Url) -> Result<Option<FetchOutcome>, CoreError> {
        let query = PageQuery::from_url(url);
        if self.target() == Some(query) {
            debug!(?query, "page unchanged, skipping fetch");
            return Ok(None);
        }
        self.fetch_page(query).await.map(Some)
    }

    /// Make `query` the target and fetch it.
    ///
    /// On failure the previous view is left untouched. Failures of a fetch
    /// that has since been superseded are dropped along with it.
    pub async fn fetch_page(&self, query: PageQuery) -> Result<FetchOutcome, CoreError> {
        if self.cancel.is_cancelled() {
            return Ok(FetchOutcome::Closed);
        }
        self.target.send_replace(Some(query));
        debug!(page = query.page, limit = query.limit, "fetching coupon page");

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Ok(FetchOutcome::Closed),
            result = self.api.list_coupons(query) => result,
        };

        if self.target() != Some(query) {
            debug!(?query, current = ?self.target(), "discarding stale page response");
            return Ok(FetchOutcome::Stale);
        }

        let view = result.inspect_err(|e| {
            warn!(page = query.page, limit = query.limit, error = %e, "coupon page fetch failed");
        })?;
        debug!(rows = view.coupons.len(), total = ?view.page.total, "coupon page applied");
        self.view.send_replace(view);
        Ok(FetchOutcome::Applied)
    }

    /// Refetch the current target (or the default page before any fetch).
    pub async fn refresh(&self) -> Result<FetchOutcome, CoreError> {
        let query = self.target().unwrap_or_default();
        self.fetch_page(query).await
    }

    /// Delete a coupon, then refetch the current page.
    ///
    /// The page is not reset: deleting the last row of a later page may
    /// leave an empty page on screen.
    pub async fn delete_coupon(&self, code: &str) -> Result<Deleted, CoreError> {
        let msg = self.api.delete_coupon(code).await.inspect_err(|e| {
            warn!(code, error = %e, "coupon delete failed");
        })?;
        info!(code, "coupon deleted");

        let notice = Notice::from_reply(msg, "Coupon deleted");
        let refresh = self.refresh().await;
        Ok(Deleted { notice, refresh })
    }

    /// Stop applying responses. In-flight fetches resolve as `Closed`.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::oneshot;

    use super::*;
    use crate::api::testing::{StubApi, coupon};
    use crate::apply::{ApplyOutcome, ApplyPayload};
    use crate::form::CouponPayload;

    /// Holds each page's response until the test opens its gate.
    struct GatedApi {
        gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    }

    impl GatedApi {
        fn new(gates: impl IntoIterator<Item = (u32, oneshot::Receiver<()>)>) -> Self {
            Self {
                gates: Mutex::new(gates.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl CouponApi for GatedApi {
        async fn list_coupons(&self, query: PageQuery) -> Result<ListView, CoreError> {
            let gate = self.gates.lock().unwrap().remove(&query.page);
            if let Some(gate) = gate {
                gate.await.unwrap();
            }
            Ok(ListView {
                page: Page {
                    current_page: query.page,
                    current_limit: query.limit,
                    ..Page::default()
                },
                coupons: vec![coupon(&format!("P{}", query.page))],
            })
        }

        async fn get_coupon(&self, _: &str) -> Result<Coupon, CoreError> {
            unimplemented!()
        }

        async fn create_coupon(&self, _: &CouponPayload) -> Result<Option<String>, CoreError> {
            unimplemented!()
        }

        async fn update_coupon(
            &self,
            _: &str,
            _: &CouponPayload,
        ) -> Result<Option<String>, CoreError> {
            unimplemented!()
        }

        async fn delete_coupon(&self, _: &str) -> Result<Option<String>, CoreError> {
            unimplemented!()
        }

        async fn apply_coupon(&self, _: &ApplyPayload) -> Result<ApplyOutcome, CoreError> {
            unimplemented!()
        }
    }

    fn url(query: &str) -> Url {
        Url::parse(&format!("http://console.local/coupon{query}")).unwrap()
    }

    #[tokio::test]
    async fn late_response_for_older_page_is_discarded() {
        let (open1, gate1) = oneshot::channel();
        let (open2, gate2) = oneshot::channel();
        let coordinator =
            CouponListCoordinator::new(Arc::new(GatedApi::new([(1, gate1), (2, gate2)])));

        let release = async {
            tokio::task::yield_now().await;
            open2.send(()).unwrap();
            tokio::task::yield_now().await;
            open1.send(()).unwrap();
        };
        let (first, second, ()) = tokio::join!(
            coordinator.fetch_page(PageQuery::new(1, 10)),
            coordinator.fetch_page(PageQuery::new(2, 10)),
            release,
        );

        assert_eq!(first.unwrap(), FetchOutcome::Stale);
        assert_eq!(second.unwrap(), FetchOutcome::Applied);
        let view = coordinator.view();
        assert_eq!(view.page.current_page, 2);
        assert_eq!(view.coupons[0].code, "P2");
    }

    #[tokio::test]
    async fn early_response_for_older_page_is_discarded() {
        let (open1, gate1) = oneshot::channel();
        let (open2, gate2) = oneshot::channel();
        let coordinator =
            CouponListCoordinator::new(Arc::new(GatedApi::new([(1, gate1), (2, gate2)])));
        let mut updates = coordinator.subscribe();

        let release = async {
            tokio::task::yield_now().await;
            open1.send(()).unwrap();
            tokio::task::yield_now().await;
            open2.send(()).unwrap();
        };
        let (first, second, ()) = tokio::join!(
            coordinator.fetch_page(PageQuery::new(1, 10)),
            coordinator.fetch_page(PageQuery::new(2, 10)),
            release,
        );

        assert_eq!(first.unwrap(), FetchOutcome::Stale);
        assert_eq!(second.unwrap(), FetchOutcome::Applied);
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().page.current_page, 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_view() {
        let api = Arc::new(StubApi::with_codes(15));
        let coordinator = CouponListCoordinator::new(api.clone());
        coordinator.fetch_page(PageQuery::new(1, 10)).await.unwrap();
        let before = coordinator.view();

        api.reject_with("backend unavailable");
        let err = coordinator
            .fetch_page(PageQuery::new(2, 10))
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("backend unavailable"));
        assert_eq!(coordinator.view(), before);
        assert_eq!(before.coupons.len(), 10);
    }

    #[tokio::test]
    async fn url_changes_fetch_exactly_once() {
        let api = Arc::new(StubApi::with_codes(30));
        let coordinator = CouponListCoordinator::new(api.clone());

        let outcome = coordinator.sync_with_url(&url("?page=2&limit=5")).await;
        assert_eq!(outcome.unwrap(), Some(FetchOutcome::Applied));
        let outcome = coordinator
            .sync_with_url(&url("?limit=5&page=2&sort=name"))
            .await;
        assert_eq!(outcome.unwrap(), None);
        coordinator.sync_with_url(&url("?page=3&limit=5")).await.unwrap();
        coordinator.sync_with_url(&url("")).await.unwrap();

        assert_eq!(api.calls(), ["list 2/5", "list 3/5", "list 1/10"]);
        assert_eq!(coordinator.target(), Some(PageQuery::default()));
    }

    #[tokio::test]
    async fn delete_refetches_current_page() {
        let api = Arc::new(StubApi::with_codes(12));
        let coordinator = CouponListCoordinator::new(api.clone());
        coordinator.fetch_page(PageQuery::new(2, 5)).await.unwrap();
        assert_eq!(coordinator.view().coupons[0].code, "C006");

        let deleted = coordinator.delete_coupon("C006").await.unwrap();

        assert_eq!(deleted.notice, Notice::success("Coupon C006 deleted"));
        assert_eq!(deleted.refresh.unwrap(), FetchOutcome::Applied);
        assert_eq!(api.calls(), ["list 2/5", "delete C006", "list 2/5"]);
        let view = coordinator.view();
        assert_eq!(view.page.current_page, 2);
        assert_eq!(view.coupons[0].code, "C007");
        assert_eq!(view.page.total, Some(11));
    }

    #[tokio::test]
    async fn deleting_last_row_leaves_empty_page() {
        let api = Arc::new(StubApi::with_codes(6));
        let coordinator = CouponListCoordinator::new(api.clone());
        coordinator.fetch_page(PageQuery::new(2, 5)).await.unwrap();

        coordinator.delete_coupon("C006").await.unwrap();

        let view = coordinator.view();
        assert_eq!(view.page.current_page, 2);
        assert!(view.coupons.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_does_not_refetch() {
        let api = Arc::new(StubApi::with_codes(3));
        let coordinator = CouponListCoordinator::new(api.clone());
        coordinator.fetch_page(PageQuery::default()).await.unwrap();

        api.reject_with("Coupon is in use");
        let err = coordinator.delete_coupon("C001").await.unwrap_err();

        assert_eq!(err.notice(), Some(Notice::error("Coupon is in use")));
        assert_eq!(api.calls(), ["list 1/10", "delete C001"]);
        assert_eq!(coordinator.view().coupons.len(), 3);
    }

    #[tokio::test]
    async fn close_discards_in_flight_fetch() {
        let (_open, gate) = oneshot::channel();
        let coordinator = CouponListCoordinator::new(Arc::new(GatedApi::new([(1, gate)])));

        let close = async {
            tokio::task::yield_now().await;
            coordinator.close();
        };
        let (outcome, ()) = tokio::join!(coordinator.fetch_page(PageQuery::default()), close);

        assert_eq!(outcome.unwrap(), FetchOutcome::Closed);
        assert!(coordinator.is_closed());
        assert_eq!(coordinator.view(), ListView::default());
        assert_eq!(
            coordinator.refresh().await.unwrap(),
            FetchOutcome::Closed
        );
    }
}
