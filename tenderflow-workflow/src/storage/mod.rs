//! SQLite persistence for submissions, offers, prior projects and projects.
//!
//! One connection behind a mutex; migrations run inline at open. All writes
//! are last-write-wins, matching the single-user execution model.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use shared_types::{OfferBundle, OfferRecord, OfferStatus, PriorProject, Project, TenderSubmission};

use crate::error::StoreError;

pub type DbConnection = Arc<Mutex<Connection>>;

pub struct Database {
    pub(crate) connection: DbConnection,
}

impl Database {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::invalid_column("database.path", format!("{}: {e}", db_path.display()))
            })?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        let database = Database {
            connection: Arc::new(Mutex::new(conn)),
        };
        database.run_migrations()?;
        Ok(database)
    }

    /// In-memory database, used by tests and throwaway sessions.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let database = Database {
            connection: Arc::new(Mutex::new(conn)),
        };
        database.run_migrations()?;
        Ok(database)
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.connection.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS soumissions (
                id TEXT PRIMARY KEY,
                entreprise_id TEXT NOT NULL,
                projet_numero TEXT NOT NULL DEFAULT '',
                nom_projet TEXT NOT NULL DEFAULT '',
                recommendation TEXT NOT NULL DEFAULT 'INCONNU',
                score INTEGER NOT NULL DEFAULT 0,
                statut TEXT NOT NULL DEFAULT '',
                analyse TEXT NOT NULL DEFAULT '',
                document_url TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // One offer per submission, ever: saving again updates in place.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS offres (
                id TEXT PRIMARY KEY,
                entreprise_id TEXT NOT NULL,
                soumission_id TEXT NOT NULL UNIQUE,
                statut TEXT NOT NULL,
                contenu TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projets_anterieurs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entreprise_id TEXT NOT NULL,
                nom_projet TEXT NOT NULL,
                montant REAL NOT NULL DEFAULT 0,
                duree_jours INTEGER NOT NULL DEFAULT 0,
                specifications TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS gestion_projets (
                projet_id TEXT PRIMARY KEY,
                entreprise_id TEXT NOT NULL,
                nom_projet TEXT NOT NULL,
                statut TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_offres_entreprise
                ON offres(entreprise_id, updated_at)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_gestion_projets_entreprise
                ON gestion_projets(entreprise_id)",
            [],
        )?;

        Ok(())
    }

    // Submissions (written by the external analysis collaborator)

    pub fn insert_submission(&self, submission: &TenderSubmission) -> Result<(), StoreError> {
        let conn = self.connection.lock().unwrap();
        conn.execute(
            "INSERT INTO soumissions (id, entreprise_id, projet_numero, nom_projet,
                recommendation, score, statut, analyse, document_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                submission.id,
                submission.company_id,
                submission.project_number,
                submission.project_name,
                submission.recommendation.as_str(),
                submission.score,
                submission.status,
                submission.analysis,
                submission.document_url,
                submission.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_submission(&self, id: &str) -> Result<TenderSubmission, StoreError> {
        let conn = self.connection.lock().unwrap();
        let raw = conn
            .query_row(
                "SELECT id, entreprise_id, projet_numero, nom_projet, recommendation,
                        score, statut, analyse, document_url, created_at
                 FROM soumissions WHERE id = ?1",
                params![id],
                SubmissionRow::read,
            )
            .optional()?;
        raw.ok_or_else(|| StoreError::not_found("submission", id))?
            .into_submission()
    }

    pub fn list_submissions(&self, company_id: &str) -> Result<Vec<TenderSubmission>, StoreError> {
        let conn = self.connection.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, entreprise_id, projet_numero, nom_projet, recommendation,
                    score, statut, analyse, document_url, created_at
             FROM soumissions WHERE entreprise_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![company_id], SubmissionRow::read)?;

        let mut submissions = Vec::new();
        for row in rows {
            submissions.push(row?.into_submission()?);
        }
        Ok(submissions)
    }

    // Offers

    pub fn find_offer_by_submission(
        &self,
        submission_id: &str,
    ) -> Result<Option<OfferRecord>, StoreError> {
        let conn = self.connection.lock().unwrap();
        let raw = conn
            .query_row(
                "SELECT id, entreprise_id, soumission_id, statut, contenu, created_at, updated_at
                 FROM offres WHERE soumission_id = ?1",
                params![submission_id],
                OfferRow::read,
            )
            .optional()?;
        raw.map(OfferRow::into_offer).transpose()
    }

    pub fn get_offer(&self, id: &str) -> Result<OfferRecord, StoreError> {
        let conn = self.connection.lock().unwrap();
        let raw = conn
            .query_row(
                "SELECT id, entreprise_id, soumission_id, statut, contenu, created_at, updated_at
                 FROM offres WHERE id = ?1",
                params![id],
                OfferRow::read,
            )
            .optional()?;
        raw.ok_or_else(|| StoreError::not_found("offer", id))?
            .into_offer()
    }

    pub fn insert_offer(&self, offer: &OfferRecord) -> Result<(), StoreError> {
        let contenu = serde_json::to_string(&offer.content)?;
        let conn = self.connection.lock().unwrap();
        conn.execute(
            "INSERT INTO offres (id, entreprise_id, soumission_id, statut, contenu,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                offer.id,
                offer.company_id,
                offer.submission_id,
                offer.status.as_str(),
                contenu,
                offer.created_at.to_rfc3339(),
                offer.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn update_offer(
        &self,
        id: &str,
        content: &OfferBundle,
        status: OfferStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let contenu = serde_json::to_string(content)?;
        let conn = self.connection.lock().unwrap();
        let changed = conn.execute(
            "UPDATE offres SET contenu = ?2, statut = ?3, updated_at = ?4 WHERE id = ?1",
            params![id, contenu, status.as_str(), updated_at.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("offer", id));
        }
        Ok(())
    }

    pub fn set_offer_status(
        &self,
        id: &str,
        status: OfferStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.connection.lock().unwrap();
        let changed = conn.execute(
            "UPDATE offres SET statut = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), updated_at.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("offer", id));
        }
        Ok(())
    }

    pub fn list_offers(&self, company_id: &str) -> Result<Vec<OfferRecord>, StoreError> {
        let conn = self.connection.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, entreprise_id, soumission_id, statut, contenu, created_at, updated_at
             FROM offres WHERE entreprise_id = ?1 ORDER BY updated_at DESC",
        )?;
        let rows = stmt.query_map(params![company_id], OfferRow::read)?;

        let mut offers = Vec::new();
        for row in rows {
            offers.push(row?.into_offer()?);
        }
        Ok(offers)
    }

    pub fn count_offers(&self) -> Result<i64, StoreError> {
        let conn = self.connection.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM offres", [], |row| row.get(0))?;
        Ok(count)
    }

    // Prior projects

    pub fn add_prior_project(
        &self,
        company_id: &str,
        project: &PriorProject,
    ) -> Result<(), StoreError> {
        let conn = self.connection.lock().unwrap();
        conn.execute(
            "INSERT INTO projets_anterieurs (entreprise_id, nom_projet, montant,
                duree_jours, specifications)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                company_id,
                project.name,
                project.amount,
                project.duration_days,
                project.specifications,
            ],
        )?;
        Ok(())
    }

    pub fn list_prior_projects(&self, company_id: &str) -> Result<Vec<PriorProject>, StoreError> {
        let conn = self.connection.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT nom_projet, montant, duree_jours, specifications
             FROM projets_anterieurs WHERE entreprise_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![company_id], |row| {
            Ok(PriorProject {
                name: row.get(0)?,
                amount: row.get(1)?,
                duration_days: row.get(2)?,
                specifications: row.get(3)?,
            })
        })?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row?);
        }
        Ok(projects)
    }

    // Projects (whole record as JSON, upsert keyed by projet_id)

    pub fn upsert_project(&self, project: &Project) -> Result<(), StoreError> {
        let data = serde_json::to_string(project)?;
        let conn = self.connection.lock().unwrap();
        conn.execute(
            "INSERT INTO gestion_projets (projet_id, entreprise_id, nom_projet, statut,
                data, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(projet_id) DO UPDATE SET
                nom_projet = excluded.nom_projet,
                statut = excluded.statut,
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![
                project.id,
                project.company_id,
                project.name,
                project.status.as_str(),
                data,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_project(&self, project_id: &str) -> Result<Project, StoreError> {
        let conn = self.connection.lock().unwrap();
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM gestion_projets WHERE projet_id = ?1",
                params![project_id],
                |row| row.get(0),
            )
            .optional()?;
        let data = data.ok_or_else(|| StoreError::not_found("project", project_id))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn list_projects(&self, company_id: &str) -> Result<Vec<Project>, StoreError> {
        let conn = self.connection.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT data FROM gestion_projets WHERE entreprise_id = ?1 ORDER BY updated_at DESC",
        )?;
        let rows = stmt.query_map(params![company_id], |row| row.get::<_, String>(0))?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(serde_json::from_str(&row?)?);
        }
        Ok(projects)
    }

    pub fn count_projects(&self) -> Result<i64, StoreError> {
        let conn = self.connection.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM gestion_projets", [], |row| row.get(0))?;
        Ok(count)
    }
}

struct SubmissionRow {
    id: String,
    company_id: String,
    project_number: String,
    project_name: String,
    recommendation: String,
    score: u8,
    status: String,
    analysis: String,
    document_url: Option<String>,
    created_at: String,
}

impl SubmissionRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            company_id: row.get(1)?,
            project_number: row.get(2)?,
            project_name: row.get(3)?,
            recommendation: row.get(4)?,
            score: row.get(5)?,
            status: row.get(6)?,
            analysis: row.get(7)?,
            document_url: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_submission(self) -> Result<TenderSubmission, StoreError> {
        Ok(TenderSubmission {
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            company_id: self.company_id,
            project_number: self.project_number,
            project_name: self.project_name,
            recommendation: self.recommendation.into(),
            score: self.score,
            status: self.status,
            analysis: self.analysis,
            document_url: self.document_url,
        })
    }
}

struct OfferRow {
    id: String,
    company_id: String,
    submission_id: String,
    status: String,
    content: String,
    created_at: String,
    updated_at: String,
}

impl OfferRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            company_id: row.get(1)?,
            submission_id: row.get(2)?,
            status: row.get(3)?,
            content: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn into_offer(self) -> Result<OfferRecord, StoreError> {
        let status: OfferStatus = self
            .status
            .parse()
            .map_err(|_| StoreError::invalid_column("statut", self.status.clone()))?;
        Ok(OfferRecord {
            status,
            content: serde_json::from_str(&self.content)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
            company_id: self.company_id,
            submission_id: self.submission_id,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::invalid_column("timestamp", value))
}
