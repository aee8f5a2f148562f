use serde::Serialize;
use snapvault_protocol::api::{
    CollectionCreate, CollectionUpdate, EventBase, EventUpdate, PhotoCreate, StudioSettingsBase,
};
use snapvault_protocol::common::{Event, StudioSettings};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::client::HttpClient;
use crate::collection::CollectionService;
use crate::config::{default_config_path, ConfigService, DashboardConfig};
use crate::error::{DashboardError, Result};
use crate::event::EventService;
use crate::page;
use crate::photo::PhotoService;
use crate::route::{EventTab, Resolution, Router};
use crate::studio::{ProfileSave, StudioSettingsService};
use crate::ui::UI;
use crate::version::format_version_info;
use crate::{
    CollectionCommand, Commands, ConfigArgs, EventCommand, EventFieldArgs, PhotoCommand,
    ProfileArgs, SettingsCommand,
};

/// CLI handler for processing commands
pub struct CliHandler {
    config_path: Option<PathBuf>,
    json: bool,
    cancel: CancellationToken,
    ui: UI,
}

impl CliHandler {
    pub fn new(config_path: Option<PathBuf>, json: bool, cancel: CancellationToken) -> Self {
        Self {
            config_path,
            json,
            cancel,
            ui: UI::new(),
        }
    }

    fn load_config(&self) -> Result<DashboardConfig> {
        DashboardConfig::load(self.config_path.as_deref())
    }

    fn client(&self) -> Result<HttpClient> {
        HttpClient::new(self.load_config()?)
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Open { path } => self.handle_open(&path).await,
            Commands::Route { path } => self.handle_route(&path),
            Commands::Tab { event_id, tab } => self.handle_tab(event_id, tab),
            Commands::Events(args) => self.handle_events(args.command).await,
            Commands::Collections(args) => self.handle_collections(args.command).await,
            Commands::Photos(args) => self.handle_photos(args.command).await,
            Commands::Settings(args) => self.handle_settings(args.command).await,
            Commands::Status => self.handle_status().await,
            Commands::Config(args) => self.handle_config(args).await,
        }
    }

    /// Handle open command - resolve, load and render a page
    async fn handle_open(&mut self, path: &str) -> Result<()> {
        let config = self.load_config()?;
        let router = Router::from_config(&config);
        let view = router.open(path)?;
        let client = HttpClient::new(config)?;

        let data = page::load(&client, &view.route, &self.cancel).await?;
        page::render(&self.ui, &view, &data);
        Ok(())
    }

    /// Handle route command - show how a path resolves
    fn handle_route(&mut self, path: &str) -> Result<()> {
        let router = Router::from_config(&self.load_config()?);
        if let Resolution::Redirect { to } = router.resolve(path)? {
            self.ui.info(&format!("{} redirects to {}", path, to));
        }
        let view = router.open(path)?;

        let shell = view
            .shell()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "(standalone)".to_string());
        self.ui.card(
            "Route",
            vec![
                ("Path", view.path.clone()),
                ("Page", view.route.title().to_string()),
                ("Shell", shell),
                ("Active", view.active_name().unwrap_or("-").to_string()),
            ],
        );

        let navigation = view.navigation();
        if !navigation.is_empty() {
            let rows = navigation
                .iter()
                .map(|entry| {
                    vec![
                        (if entry.active { "*" } else { "" }).to_string(),
                        entry.name.to_string(),
                        entry.href.clone(),
                    ]
                })
                .collect();
            self.ui.table(&["", "Entry", "Path"], rows);
        }
        Ok(())
    }

    fn handle_tab(&mut self, event_id: i64, tab: EventTab) -> Result<()> {
        println!("{}", tab.href(event_id));
        Ok(())
    }

    async fn handle_events(&mut self, command: EventCommand) -> Result<()> {
        let client = self.client()?;
        let service = EventService::new(&client);
        let cancel = &self.cancel;

        match command {
            EventCommand::List => {
                let events = service.get_all(cancel).await?;
                if self.json {
                    return print_json(&events);
                }
                let rows = events.iter().map(|e| page::event_row(&self.ui, e)).collect();
                self.ui.table(&page::EVENT_HEADERS, rows);
            }
            EventCommand::Get { id } => {
                let event = service.get_by_id(id, cancel).await?;
                self.show_event(&event)?;
            }
            EventCommand::Create { name, fields } => {
                let event = service.create(&event_base(name, fields), cancel).await?;
                self.ui.success(&format!("Created event {}", event.id));
                self.show_event(&event)?;
            }
            EventCommand::Update { id, name, fields } => {
                let update = event_update(name, fields);
                if update.is_empty() {
                    return Err(DashboardError::invalid_input("Nothing to update"));
                }
                let event = service.update(id, &update, cancel).await?;
                self.ui.success(&format!("Updated event {}", event.id));
                self.show_event(&event)?;
            }
            EventCommand::Delete { id, force } => {
                self.confirm_delete(&format!("event {}", id), force)?;
                service.delete(id, cancel).await?;
                self.ui.success(&format!("Deleted event {}", id));
            }
            EventCommand::Photos { id } => {
                let photos = service.get_photos(id, cancel).await?;
                if self.json {
                    return print_json(&photos);
                }
                self.ui
                    .table(&page::PHOTO_HEADERS, photos.iter().map(page::photo_row).collect());
            }
            EventCommand::UploadPhoto {
                id,
                title,
                url,
                file_size,
            } => {
                let photo = PhotoCreate {
                    title,
                    url,
                    event_id: id,
                    file_size,
                };
                let photo = service.upload_photo(id, &photo, cancel).await?;
                if self.json {
                    return print_json(&photo);
                }
                self.ui
                    .success(&format!("Added photo {} to event {}", photo.id, photo.event_id));
            }
        }
        Ok(())
    }

    async fn handle_collections(&mut self, command: CollectionCommand) -> Result<()> {
        let client = self.client()?;
        let service = CollectionService::new(&client);
        let cancel = &self.cancel;

        match command {
            CollectionCommand::List { event_id } => {
                let collections = service.get_all(event_id, cancel).await?;
                if self.json {
                    return print_json(&collections);
                }
                let rows = collections.iter().map(page::collection_row).collect();
                self.ui.table(&page::COLLECTION_HEADERS, rows);
            }
            CollectionCommand::Get { id } => {
                let collection = service.get_by_id(id, cancel).await?;
                if self.json {
                    return print_json(&collection);
                }
                self.ui.table(
                    &page::COLLECTION_HEADERS,
                    vec![page::collection_row(&collection)],
                );
            }
            CollectionCommand::Create { name, event_id } => {
                let collection = service
                    .create(&CollectionCreate { name, event_id }, cancel)
                    .await?;
                self.ui
                    .success(&format!("Created collection {}", collection.id));
            }
            CollectionCommand::Update { id, name, event_id } => {
                let update = CollectionUpdate { name, event_id };
                if update.is_empty() {
                    return Err(DashboardError::invalid_input("Nothing to update"));
                }
                let collection = service.update(id, &update, cancel).await?;
                self.ui
                    .success(&format!("Updated collection {}", collection.id));
            }
            CollectionCommand::Delete { id, force } => {
                self.confirm_delete(&format!("collection {}", id), force)?;
                service.delete(id, cancel).await?;
                self.ui.success(&format!("Deleted collection {}", id));
            }
        }
        Ok(())
    }

    async fn handle_photos(&mut self, command: PhotoCommand) -> Result<()> {
        let client = self.client()?;
        match command {
            PhotoCommand::List => {
                let photos = PhotoService::new(&client).get_all(&self.cancel).await?;
                if self.json {
                    return print_json(&photos);
                }
                self.ui
                    .table(&page::PHOTO_HEADERS, photos.iter().map(page::photo_row).collect());
            }
        }
        Ok(())
    }

    async fn handle_settings(&mut self, command: SettingsCommand) -> Result<()> {
        let client = self.client()?;
        let service = StudioSettingsService::new(&client);
        let cancel = &self.cancel;

        match command {
            SettingsCommand::List => {
                let studios = service.get_all(cancel).await?;
                if self.json {
                    return print_json(&studios);
                }
                let rows = studios.iter().map(page::studio_row).collect();
                self.ui.table(&page::STUDIO_HEADERS, rows);
            }
            SettingsCommand::Current => {
                let settings = service.get_current(cancel).await?;
                self.show_studio(&settings)?;
            }
            SettingsCommand::Get { id } => {
                let settings = service.get_by_id(id, cancel).await?;
                self.show_studio(&settings)?;
            }
            SettingsCommand::Create(profile) => {
                let settings = service.create(&profile_base(profile), cancel).await?;
                self.ui
                    .success(&format!("Created studio profile {}", settings.id));
                self.show_studio(&settings)?;
            }
            SettingsCommand::Update { id, profile } => {
                let stored = service.get_by_id(id, cancel).await?;
                let merged = overlay_profile(profile, StudioSettingsBase::from(&stored));
                let settings = service.update(id, &merged, cancel).await?;
                self.ui
                    .success(&format!("Updated studio profile {}", settings.id));
                self.show_studio(&settings)?;
            }
            SettingsCommand::Delete { id, force } => {
                self.confirm_delete(&format!("studio profile {}", id), force)?;
                service.delete(id, cancel).await?;
                self.ui.success(&format!("Deleted studio profile {}", id));
            }
            SettingsCommand::SaveProfile(profile) => {
                let saved = service
                    .save_profile(|stored| overlay_profile(profile, stored), cancel)
                    .await?;
                match &saved {
                    ProfileSave::Created(s) => {
                        self.ui.success(&format!("Created studio profile {}", s.id))
                    }
                    ProfileSave::Updated(s) => {
                        self.ui.success(&format!("Updated studio profile {}", s.id))
                    }
                }
                self.show_studio(saved.settings())?;
            }
        }
        Ok(())
    }

    /// Handle status command
    async fn handle_status(&mut self) -> Result<()> {
        let client = self.client()?;
        let config = client.config();

        let healthy = match client.health(&self.cancel).await {
            Ok(healthy) => healthy,
            Err(e) if e.is_network_error() => {
                tracing::debug!(error = %e, "health probe failed");
                false
            }
            Err(e) => return Err(e),
        };
        let server = self.ui.format_server_status(healthy);

        self.ui.card(
            "Status",
            vec![
                ("Version", format_version_info()),
                ("Backend", config.backend_url.clone()),
                ("API base", config.api_base_url()),
                ("Default route", config.default_route.clone()),
                ("Server", server),
            ],
        );
        if !healthy {
            self.ui.warning(&format!(
                "No healthy backend at {}; check `snapvault config show`",
                config.backend_url
            ));
        }
        Ok(())
    }

    /// Handle config command
    async fn handle_config(&mut self, args: ConfigArgs) -> Result<()> {
        let config = self.load_config()?;
        let path = self.config_path.clone().unwrap_or_else(default_config_path);
        let mut service = ConfigService::with_config_path(config, path);
        service.handle_config(args.command).await
    }

    fn confirm_delete(&self, what: &str, force: bool) -> Result<()> {
        if force {
            return Ok(());
        }
        if self.ui.confirm(&format!("Delete {}?", what))? {
            Ok(())
        } else {
            Err(DashboardError::user_cancelled())
        }
    }

    fn show_event(&self, event: &Event) -> Result<()> {
        if self.json {
            return print_json(event);
        }
        let date_or_dash = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        };
        let text_or_dash = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());

        self.ui.card(
            &event.name,
            vec![
                ("Id", event.id.to_string()),
                ("Status", self.ui.format_event_status(event.status.as_deref())),
                ("Type", text_or_dash(&event.event_type)),
                ("Start", date_or_dash(event.start_date)),
                ("End", date_or_dash(event.end_date)),
                ("Location", text_or_dash(&event.location)),
                ("Template", text_or_dash(&event.template_id)),
                ("Photos", event.photo_count.unwrap_or(0).to_string()),
                ("Videos", event.video_count.unwrap_or(0).to_string()),
                ("Updated", event.updated_at.clone()),
            ],
        );
        Ok(())
    }

    fn show_studio(&self, settings: &StudioSettings) -> Result<()> {
        if self.json {
            return print_json(settings);
        }
        let text_or_dash = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());

        self.ui.card(
            settings.display_name(),
            vec![
                ("Id", settings.id.to_string()),
                (
                    "User",
                    settings
                        .user_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                ("Name", text_or_dash(&settings.full_name)),
                ("Email", text_or_dash(&settings.email_id)),
                ("Mobile", text_or_dash(&settings.mobile_number)),
                ("City", text_or_dash(&settings.city)),
                ("Country", text_or_dash(&settings.country)),
                ("Industry", text_or_dash(&settings.industry)),
                ("GST/VAT", text_or_dash(&settings.gst_vat_number)),
            ],
        );
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn event_base(name: String, fields: EventFieldArgs) -> EventBase {
    EventBase {
        name,
        start_date: fields.start_date,
        end_date: fields.end_date,
        event_type: fields.event_type,
        location: fields.location,
        description: fields.description,
        template_id: fields.template_id,
        status: fields.status,
    }
}

fn event_update(name: Option<String>, fields: EventFieldArgs) -> EventUpdate {
    EventUpdate {
        name,
        start_date: fields.start_date,
        end_date: fields.end_date,
        event_type: fields.event_type,
        location: fields.location,
        description: fields.description,
        template_id: fields.template_id,
        status: fields.status,
    }
}

/// Profile with exactly the given flags set; the rest go out as null
fn profile_base(profile: ProfileArgs) -> StudioSettingsBase {
    overlay_profile(profile, StudioSettingsBase::default())
}

/// Flags given on the command line win over `base`
fn overlay_profile(profile: ProfileArgs, base: StudioSettingsBase) -> StudioSettingsBase {
    StudioSettingsBase {
        full_name: profile.full_name.or(base.full_name),
        mobile_number: profile.mobile_number.or(base.mobile_number),
        email_id: profile.email.or(base.email_id),
        country: profile.country.or(base.country),
        state: profile.state.or(base.state),
        city: profile.city.or(base.city),
        company_name: profile.company_name.or(base.company_name),
        industry: profile.industry.or(base.industry),
        area: profile.area.or(base.area),
        avg_events_per_year: profile.avg_events_per_year.or(base.avg_events_per_year),
        billing_company_name: profile.billing_company_name.or(base.billing_company_name),
        gst_vat_number: profile.gst_vat_number.or(base.gst_vat_number),
    }
}
