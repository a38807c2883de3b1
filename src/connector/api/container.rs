use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::connector::adapter::firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE};
use crate::domain::DEFAULT_RECOGNITION_THRESHOLD;
use crate::{
    FaceRepository, FirestoreClient, FirestoreFaceRepository, InMemoryFaceRepository,
    RecognizeFaceUseCase, RegisterFaceUseCase, ServiceAccountKey, ServiceAccountTokenProvider,
    StaticTokenProvider, StoreStatsUseCase, TokenProvider,
};

/// Project ID used against the emulator when none is configured.
const EMULATOR_PROJECT_ID: &str = "demo-facematch";

pub struct FirestoreConfig {
    pub project_id: Option<String>,
    pub database: String,
    pub base_url: String,
    /// Service account JSON passed inline, e.g. through an environment variable.
    pub credentials_json: Option<String>,
    pub credentials_path: PathBuf,
    /// Pre-minted access token; skips the service account exchange.
    pub access_token: Option<String>,
    /// `host:port` of a local emulator.
    pub emulator_host: Option<String>,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials_json: None,
            credentials_path: PathBuf::from("serviceAccountKey.json"),
            access_token: None,
            emulator_host: None,
        }
    }
}

pub struct ContainerConfig {
    pub memory_storage: bool,
    pub threshold: f64,
    pub firestore: FirestoreConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            memory_storage: false,
            threshold: DEFAULT_RECOGNITION_THRESHOLD,
            firestore: FirestoreConfig::default(),
        }
    }
}

pub struct Container {
    face_repo: Arc<dyn FaceRepository>,
    threshold: f64,
    storage: String,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        if config.memory_storage {
            debug!("Using in-memory face storage");
            return Ok(Self::with_repository(
                Arc::new(InMemoryFaceRepository::new()),
                config.threshold,
            ));
        }

        let fs = config.firestore;
        let (client, storage) = if let Some(host) = fs.emulator_host.as_deref() {
            let project_id = fs
                .project_id
                .unwrap_or_else(|| EMULATOR_PROJECT_ID.to_string());
            let client = FirestoreClient::emulator(
                host,
                project_id,
                fs.database,
                Arc::new(StaticTokenProvider::emulator()),
            )?;
            let storage = format!(
                "firestore emulator at {} (project {}, database {})",
                host,
                client.project_id(),
                client.database()
            );
            (client, storage)
        } else {
            let (project_id, token_provider): (String, Arc<dyn TokenProvider>) =
                if let Some(token) = fs.access_token {
                    let project_id = fs
                        .project_id
                        .context("a project ID is required when using a static access token")?;
                    (project_id, Arc::new(StaticTokenProvider::new(token)))
                } else {
                    let key = ServiceAccountKey::load(
                        fs.credentials_json.as_deref(),
                        &fs.credentials_path,
                    )
                    .context("Failed to load Firestore credentials")?;
                    debug!("Authenticating as {}", key.client_email);
                    let provider = ServiceAccountTokenProvider::new(key)
                        .context("Failed to initialize service account authentication")?;
                    let project_id = fs
                        .project_id
                        .unwrap_or_else(|| provider.project_id().to_string());
                    (project_id, Arc::new(provider))
                };

            let client =
                FirestoreClient::new(&fs.base_url, project_id, fs.database, token_provider)?;
            let storage = format!(
                "firestore (project {}, database {})",
                client.project_id(),
                client.database()
            );
            (client, storage)
        };

        debug!("Using {}", storage);

        Ok(Self {
            face_repo: Arc::new(FirestoreFaceRepository::new(client)),
            threshold: config.threshold,
            storage,
        })
    }

    /// Wire the use cases to an already constructed repository.
    pub fn with_repository(face_repo: Arc<dyn FaceRepository>, threshold: f64) -> Self {
        Self {
            face_repo,
            threshold,
            storage: "in-memory".to_string(),
        }
    }

    pub fn register_use_case(&self) -> RegisterFaceUseCase {
        RegisterFaceUseCase::new(self.face_repo.clone())
    }

    pub fn recognize_use_case(&self) -> RecognizeFaceUseCase {
        RecognizeFaceUseCase::new(self.face_repo.clone()).with_threshold(self.threshold)
    }

    pub fn stats_use_case(&self) -> StoreStatsUseCase {
        StoreStatsUseCase::new(self.face_repo.clone())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Human-readable description of the storage backend.
    pub fn storage(&self) -> &str {
        &self.storage
    }
}
