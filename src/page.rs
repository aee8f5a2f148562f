//! Page loaders and terminal rendering
//!
//! A page load is one view scope: every request it issues shares a child of
//! the caller's cancellation token, so abandoning the view (Ctrl-C, or simply
//! dropping the load future) abandons all of its in-flight requests at once.

use snapvault_protocol::common::{Collection, Event, Photo, StudioSettings};
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::collection::CollectionService;
use crate::error::Result;
use crate::event::EventService;
use crate::photo::{PhotoService, PhotoStats};
use crate::route::{EventTab, Route, View};
use crate::studio::StudioSettingsService;
use crate::ui::{format_bytes, UI};

/// Number of events shown on the studio dashboard
const RECENT_EVENTS: usize = 5;

/// Local state of one loaded page
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    StudioDashboard {
        events: Vec<Event>,
        photos: Vec<Photo>,
    },
    StudioEvents {
        events: Vec<Event>,
    },
    StudioPhotos {
        photos: Vec<Photo>,
    },
    SuperAdminDashboard {
        events: Vec<Event>,
        studios: Vec<StudioSettings>,
    },
    SuperAdminStudios {
        studios: Vec<StudioSettings>,
    },
    EventDetails {
        event: Event,
        tab: TabData,
    },
    EventGallery {
        event: Event,
        photos: Vec<Photo>,
    },
    /// Demo gallery, no backend data
    DemoGallery,
}

/// Data behind one event-details tab
#[derive(Debug, Clone, PartialEq)]
pub enum TabData {
    Photos(Vec<Photo>),
    Design,
    Analytics(EventAnalytics),
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventAnalytics {
    pub overall: PhotoStats,
    pub collections: Vec<(Collection, PhotoStats)>,
    /// Photos not filed under any collection
    pub unfiled: PhotoStats,
}

impl EventAnalytics {
    pub fn from_parts(photos: &[Photo], collections: Vec<Collection>) -> Self {
        let per_collection = collections
            .into_iter()
            .map(|collection| {
                let stats = PhotoStats::from_photos(
                    photos
                        .iter()
                        .filter(|p| p.collection_id == Some(collection.id)),
                );
                (collection, stats)
            })
            .collect();

        Self {
            overall: PhotoStats::from_photos(photos),
            collections: per_collection,
            unfiled: PhotoStats::from_photos(photos.iter().filter(|p| p.collection_id.is_none())),
        }
    }
}

/// Fetch everything `route` shows. Sibling requests run concurrently.
pub async fn load<C: ApiClient>(
    client: &C,
    route: &Route,
    parent: &CancellationToken,
) -> Result<PageData> {
    let scope = parent.child_token();
    let _guard = scope.clone().drop_guard();

    let events = EventService::new(client);
    let photos = PhotoService::new(client);
    let studios = StudioSettingsService::new(client);

    let data = match route {
        Route::StudioDashboard => {
            let (events, photos) =
                tokio::try_join!(events.get_all(&scope), photos.get_all(&scope))?;
            PageData::StudioDashboard { events, photos }
        }
        Route::StudioEvents => PageData::StudioEvents {
            events: events.get_all(&scope).await?,
        },
        Route::StudioPhotos => PageData::StudioPhotos {
            photos: photos.get_all(&scope).await?,
        },
        Route::SuperAdminDashboard => {
            let (events, studios) =
                tokio::try_join!(events.get_all(&scope), studios.get_all(&scope))?;
            PageData::SuperAdminDashboard { events, studios }
        }
        Route::SuperAdminStudios => PageData::SuperAdminStudios {
            studios: studios.get_all(&scope).await?,
        },
        Route::EventDetails { event_id, tab } => {
            load_event_details(client, *event_id, *tab, &scope).await?
        }
        Route::EventGallery {
            event_id: Some(event_id),
        } => {
            let (event, photos) = tokio::try_join!(
                events.get_by_id(*event_id, &scope),
                events.get_photos(*event_id, &scope)
            )?;
            PageData::EventGallery { event, photos }
        }
        Route::EventGallery { event_id: None } => PageData::DemoGallery,
    };

    tracing::debug!(page = route.title(), "page loaded");
    Ok(data)
}

async fn load_event_details<C: ApiClient>(
    client: &C,
    event_id: i64,
    tab: EventTab,
    scope: &CancellationToken,
) -> Result<PageData> {
    let events = EventService::new(client);

    let (event, tab) = match tab {
        EventTab::Photos => {
            let (event, photos) = tokio::try_join!(
                events.get_by_id(event_id, scope),
                events.get_photos(event_id, scope)
            )?;
            (event, TabData::Photos(photos))
        }
        EventTab::Analytics => {
            let collections = CollectionService::new(client);
            let (event, photos, collections) = tokio::try_join!(
                events.get_by_id(event_id, scope),
                events.get_photos(event_id, scope),
                collections.get_all(Some(event_id), scope)
            )?;
            let analytics = EventAnalytics::from_parts(&photos, collections);
            (event, TabData::Analytics(analytics))
        }
        EventTab::Design => (events.get_by_id(event_id, scope).await?, TabData::Design),
        EventTab::Settings => (events.get_by_id(event_id, scope).await?, TabData::Settings),
    };

    Ok(PageData::EventDetails { event, tab })
}

/// Draw a loaded page inside its shell
pub fn render(ui: &UI, view: &View, data: &PageData) {
    if let Some(shell) = view.shell() {
        ui.navigation(shell.label(), &view.navigation());
    }

    match data {
        PageData::StudioDashboard { events, photos } => {
            ui.header(view.route.title());
            let stats = PhotoStats::from_photos(photos);
            let published = events.iter().filter(|e| e.is_published()).count();
            ui.card(
                "Overview",
                vec![
                    ("Events", events.len().to_string()),
                    ("Published", published.to_string()),
                    ("Photos", stats.count.to_string()),
                    ("Storage", format_bytes(stats.total_bytes)),
                ],
            );
            ui.info("Recent events");
            let recent = events.iter().take(RECENT_EVENTS);
            ui.table(&EVENT_HEADERS, recent.map(|e| event_row(ui, e)).collect());
        }
        PageData::StudioEvents { events } => {
            ui.header(view.route.title());
            ui.table(&EVENT_HEADERS, events.iter().map(|e| event_row(ui, e)).collect());
        }
        PageData::StudioPhotos { photos } => {
            ui.header(view.route.title());
            ui.table(&PHOTO_HEADERS, photos.iter().map(photo_row).collect());
        }
        PageData::SuperAdminDashboard { events, studios } => {
            ui.header(view.route.title());
            ui.card(
                "Platform",
                vec![
                    ("Studios", studios.len().to_string()),
                    ("Events", events.len().to_string()),
                    (
                        "Published events",
                        events.iter().filter(|e| e.is_published()).count().to_string(),
                    ),
                ],
            );
        }
        PageData::SuperAdminStudios { studios } => {
            ui.header(view.route.title());
            ui.table(&STUDIO_HEADERS, studios.iter().map(studio_row).collect());
        }
        PageData::EventDetails { event, tab } => {
            ui.header(&event.name);
            render_tab(ui, event, tab);
        }
        PageData::EventGallery { event, photos } => {
            ui.header(&event.name);
            let mut details = vec![("Photos", photos.len().to_string())];
            if let Some(date) = event.start_date {
                details.push(("Date", date.to_string()));
            }
            if let Some(location) = &event.location {
                details.push(("Location", location.clone()));
            }
            ui.card("Gallery", details);
            ui.table(&PHOTO_HEADERS, photos.iter().map(photo_row).collect());
        }
        PageData::DemoGallery => {
            ui.header("Demo Gallery");
            ui.info("Sample gallery with no backend data");
        }
    }
}

fn render_tab(ui: &UI, event: &Event, tab: &TabData) {
    match tab {
        TabData::Photos(photos) => {
            ui.table(&PHOTO_HEADERS, photos.iter().map(photo_row).collect());
        }
        TabData::Design => {
            ui.card(
                "Design",
                vec![("Template", or_dash(event.template_id.as_deref()))],
            );
        }
        TabData::Analytics(analytics) => {
            ui.card(
                "Totals",
                vec![
                    ("Photos", analytics.overall.count.to_string()),
                    ("Storage", format_bytes(analytics.overall.total_bytes)),
                    ("Without size", analytics.overall.without_size.to_string()),
                ],
            );
            let mut rows: Vec<Vec<String>> = analytics
                .collections
                .iter()
                .map(|(collection, stats)| stats_row(&collection.name, stats))
                .collect();
            if analytics.unfiled.count > 0 {
                rows.push(stats_row("(no collection)", &analytics.unfiled));
            }
            ui.table(&["Collection", "Photos", "Storage"], rows);
        }
        TabData::Settings => {
            ui.card(
                "Settings",
                vec![
                    ("Name", event.name.clone()),
                    ("Type", or_dash(event.event_type.as_deref())),
                    ("Start", or_dash(event.start_date.map(|d| d.to_string()).as_deref())),
                    ("End", or_dash(event.end_date.map(|d| d.to_string()).as_deref())),
                    ("Location", or_dash(event.location.as_deref())),
                    ("Status", ui.format_event_status(event.status.as_deref())),
                    ("Description", or_dash(event.description.as_deref())),
                ],
            );
        }
    }
}

pub const EVENT_HEADERS: [&str; 5] = ["Id", "Name", "Date", "Location", "Status"];
pub const PHOTO_HEADERS: [&str; 4] = ["Id", "Title", "Event", "Size"];
pub const STUDIO_HEADERS: [&str; 5] = ["Id", "Studio", "Contact", "Email", "City"];
pub const COLLECTION_HEADERS: [&str; 3] = ["Id", "Name", "Event"];

pub fn event_row(ui: &UI, event: &Event) -> Vec<String> {
    vec![
        event.id.to_string(),
        event.name.clone(),
        or_dash(event.start_date.map(|d| d.to_string()).as_deref()),
        or_dash(event.location.as_deref()),
        ui.format_event_status(event.status.as_deref()),
    ]
}

pub fn photo_row(photo: &Photo) -> Vec<String> {
    vec![
        photo.id.to_string(),
        photo.title.clone(),
        photo.event_id.to_string(),
        photo
            .byte_size()
            .map(format_bytes)
            .unwrap_or_else(|| "-".to_string()),
    ]
}

pub fn studio_row(studio: &StudioSettings) -> Vec<String> {
    vec![
        studio.id.to_string(),
        studio.display_name().to_string(),
        or_dash(studio.full_name.as_deref()),
        or_dash(studio.email_id.as_deref()),
        or_dash(studio.city.as_deref()),
    ]
}

pub fn collection_row(collection: &Collection) -> Vec<String> {
    vec![
        collection.id.to_string(),
        collection.name.clone(),
        collection.event_id.to_string(),
    ]
}

fn stats_row(name: &str, stats: &PhotoStats) -> Vec<String> {
    vec![
        name.to_string(),
        stats.count.to_string(),
        format_bytes(stats.total_bytes),
    ]
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::{
        collection_json, event_json, photo_json, studio_settings_json,
    };
    use reqwest::Method;
    use serde_json::json;
    use std::time::Duration;

    fn sorted_lines(client: &MockApiClient) -> Vec<String> {
        let mut lines = client.request_lines();
        lines.sort();
        lines
    }

    #[tokio::test]
    async fn test_studio_dashboard_loads_events_and_photos() {
        let client = MockApiClient::new();
        client.add_response(
            Method::GET,
            "/events/",
            200,
            json!([event_json(1, "Wedding", "published"), event_json(2, "Gala", "draft")]),
        );
        client.add_response(
            Method::GET,
            "/photos/",
            200,
            json!([photo_json(10, 1, Some(2048))]),
        );

        let data = load(&client, &Route::StudioDashboard, &CancellationToken::new())
            .await
            .unwrap();

        match data {
            PageData::StudioDashboard { events, photos } => {
                assert_eq!(events.len(), 2);
                assert_eq!(photos.len(), 1);
            }
            other => panic!("unexpected page {:?}", other),
        }
        assert_eq!(sorted_lines(&client), vec!["GET /events/", "GET /photos/"]);
    }

    #[tokio::test]
    async fn test_super_admin_pages_load_studio_settings() {
        let client = MockApiClient::new();
        client.add_response(
            Method::GET,
            "/studio-settings/",
            200,
            json!([studio_settings_json(1, "Golden Hour")]),
        );
        client.add_response(Method::GET, "/events/", 200, json!([]));

        let data = load(&client, &Route::SuperAdminStudios, &CancellationToken::new())
            .await
            .unwrap();
        assert!(matches!(data, PageData::SuperAdminStudios { ref studios } if studios.len() == 1));

        let data = load(&client, &Route::SuperAdminDashboard, &CancellationToken::new())
            .await
            .unwrap();
        assert!(matches!(data, PageData::SuperAdminDashboard { .. }));
    }

    #[tokio::test]
    async fn test_event_photos_tab() {
        let client = MockApiClient::new();
        client.add_response(Method::GET, "/events/7", 200, event_json(7, "Wedding", "draft"));
        client.add_response(
            Method::GET,
            "/events/7/photos",
            200,
            json!([photo_json(1, 7, Some(100)), photo_json(2, 7, None)]),
        );

        let route = Route::EventDetails {
            event_id: 7,
            tab: EventTab::Photos,
        };
        let data = load(&client, &route, &CancellationToken::new()).await.unwrap();

        match data {
            PageData::EventDetails {
                event,
                tab: TabData::Photos(photos),
            } => {
                assert_eq!(event.id, 7);
                assert_eq!(photos.len(), 2);
            }
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_event_analytics_groups_by_collection() {
        let client = MockApiClient::new();
        client.add_response(Method::GET, "/events/7", 200, event_json(7, "Wedding", "published"));

        let mut filed = photo_json(1, 7, Some(1000));
        filed["collection_id"] = json!(3);
        let mut filed_too = photo_json(2, 7, Some(500));
        filed_too["collection_id"] = json!(3);
        client.add_response(
            Method::GET,
            "/events/7/photos",
            200,
            json!([filed, filed_too, photo_json(3, 7, None)]),
        );
        client.add_response(
            Method::GET,
            "/collections/?event_id=7",
            200,
            json!([collection_json(3, "Ceremony", 7), collection_json(4, "Party", 7)]),
        );

        let route = Route::EventDetails {
            event_id: 7,
            tab: EventTab::Analytics,
        };
        let data = load(&client, &route, &CancellationToken::new()).await.unwrap();

        let PageData::EventDetails {
            tab: TabData::Analytics(analytics),
            ..
        } = data
        else {
            panic!("expected analytics tab");
        };
        assert_eq!(analytics.overall.count, 3);
        assert_eq!(analytics.overall.total_bytes, 1500);
        assert_eq!(analytics.overall.without_size, 1);
        assert_eq!(analytics.collections.len(), 2);
        assert_eq!(analytics.collections[0].1.count, 2);
        assert_eq!(analytics.collections[0].1.total_bytes, 1500);
        assert_eq!(analytics.collections[1].1.count, 0);
        assert_eq!(analytics.unfiled.count, 1);
    }

    #[tokio::test]
    async fn test_design_and_settings_tabs_fetch_only_the_event() {
        for tab in [EventTab::Design, EventTab::Settings] {
            let client = MockApiClient::new();
            client.add_response(Method::GET, "/events/7", 200, event_json(7, "Wedding", "draft"));

            load(&client, &Route::EventDetails { event_id: 7, tab }, &CancellationToken::new())
                .await
                .unwrap();
            assert_eq!(client.request_lines(), vec!["GET /events/7"]);
        }
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let client = MockApiClient::new();
        client.add_response(Method::GET, "/events/7/photos", 200, json!([]));

        let err = load(
            &client,
            &Route::EventGallery { event_id: Some(7) },
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_demo_gallery_fetches_nothing() {
        let client = MockApiClient::new();
        let data = load(&client, &Route::EventGallery { event_id: None }, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(data, PageData::DemoGallery);
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_parent_abandons_page() {
        let client = MockApiClient::new().with_delay(Duration::from_secs(5));
        client.add_response(Method::GET, "/events/", 200, json!([]));
        client.add_response(Method::GET, "/photos/", 200, json!([]));

        let parent = CancellationToken::new();
        let trigger = parent.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = load(&client, &Route::StudioDashboard, &parent)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_finished_page_leaves_parent_usable() {
        let client = MockApiClient::new();
        client.add_response(Method::GET, "/events/", 200, json!([]));
        let parent = CancellationToken::new();

        load(&client, &Route::StudioEvents, &parent).await.unwrap();
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_rows() {
        let photo: Photo = serde_json::from_value(photo_json(1, 7, Some(2048))).unwrap();
        assert_eq!(photo_row(&photo), vec!["1", "photo-1", "7", "2.0 KB"]);

        let studio: StudioSettings =
            serde_json::from_value(studio_settings_json(2, "Golden Hour")).unwrap();
        assert_eq!(studio_row(&studio)[1], "Golden Hour");
    }
}
