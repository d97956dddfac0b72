//! Scorekeeping for games.
//!
//! Games live in the document store under the `games` collection, one
//! document per game with its rounds embedded. All access is scoped to
//! the session's tenant, and every game belongs to the user who created
//! it; other users of the same tenant get a 403, not a 404, so that a
//! shared link fails loudly instead of looking deleted.

use crate::error::{ApiError, ApiResult};
use chrono::Utc;
use rand::Rng;
use scorebridge_core::SessionContext;
use scorebridge_docstore::{DocumentStore, Query, SortDirection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

const COLLECTION: &str = "games";

const DEFAULT_TARGET_SCORE: i64 = 500;

/// A participant in a game. Player ids are local to the game document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// One scoring round: points per player id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRound {
    pub id: String,
    pub scores: HashMap<String, i64>,
}

/// A stored game with its full round history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    /// RFC 3339 creation timestamp, used for listing order.
    pub date: String,
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<GameRound>,
    pub target_score: i64,
    pub is_complete: bool,
    pub user_id: String,
    pub tenant_id: String,
}

impl Game {
    /// Total score per player across all rounds. Every player appears,
    /// even with no rounds scored yet.
    #[must_use]
    pub fn player_totals(&self) -> HashMap<&str, i64> {
        let mut totals: HashMap<&str, i64> = self
            .players
            .iter()
            .map(|p| (p.id.as_str(), 0))
            .collect();
        for round in &self.rounds {
            for (player_id, score) in &round.scores {
                if let Some(total) = totals.get_mut(player_id.as_str()) {
                    *total += score;
                }
            }
        }
        totals
    }

    /// Whether any player has reached the target score.
    #[must_use]
    pub fn target_reached(&self) -> bool {
        self.player_totals()
            .values()
            .any(|total| *total >= self.target_score)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub name: String,
    /// Player display names; ids are assigned server-side.
    pub players: Vec<String>,
    #[serde(default = "default_target_score")]
    pub target_score: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    pub name: Option<String>,
    pub target_score: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRequest {
    pub scores: HashMap<String, i64>,
}

fn default_target_score() -> i64 {
    DEFAULT_TARGET_SCORE
}

/// Generates a document id: millisecond timestamp plus a short random
/// suffix, so ids sort roughly by creation time.
fn generate_id() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Game CRUD and scoring over the document store.
#[derive(Clone)]
pub struct GameService {
    documents: Arc<dyn DocumentStore>,
}

impl GameService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    pub async fn create(
        &self,
        session: &SessionContext,
        request: CreateGameRequest,
    ) -> ApiResult<Game> {
        if request.name.trim().is_empty() {
            return Err(ApiError::Validation("Game name is required".to_string()));
        }
        if request.players.is_empty() {
            return Err(ApiError::Validation(
                "At least one player is required".to_string(),
            ));
        }
        if request.target_score <= 0 {
            return Err(ApiError::Validation(
                "Target score must be positive".to_string(),
            ));
        }

        let game_id = generate_id();
        let players = request
            .players
            .into_iter()
            .map(|name| Player {
                id: generate_id(),
                name,
            })
            .collect();

        let game = Game {
            id: game_id,
            name: request.name,
            date: Utc::now().to_rfc3339(),
            players,
            rounds: Vec::new(),
            target_score: request.target_score,
            is_complete: false,
            user_id: session.user_id.as_str().to_string(),
            tenant_id: session.tenant_id.as_str().to_string(),
        };

        self.write(session, &game).await?;
        tracing::debug!(game_id = %game.id, "created game");
        Ok(game)
    }

    /// All games created by the session's user, newest first.
    pub async fn list(&self, session: &SessionContext) -> ApiResult<Vec<Game>> {
        let query = Query::new()
            .filter_eq("userId", json!(session.user_id.as_str()))
            .order_by("date", SortDirection::Descending);

        let documents = self
            .documents
            .query(&session.tenant_id, COLLECTION, &query)
            .await?;

        documents
            .into_iter()
            .map(|doc| {
                serde_json::from_value(doc.data)
                    .map_err(|e| ApiError::Internal(format!("corrupt game document: {e}")))
            })
            .collect()
    }

    pub async fn get(&self, session: &SessionContext, game_id: &str) -> ApiResult<Game> {
        self.load_owned(session, game_id).await
    }

    pub async fn update(
        &self,
        session: &SessionContext,
        game_id: &str,
        request: UpdateGameRequest,
    ) -> ApiResult<Game> {
        let mut game = self.load_owned(session, game_id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation("Game name is required".to_string()));
            }
            game.name = name;
        }
        if let Some(target_score) = request.target_score {
            if target_score <= 0 {
                return Err(ApiError::Validation(
                    "Target score must be positive".to_string(),
                ));
            }
            game.target_score = target_score;
        }
        game.is_complete = game.target_reached();

        self.write(session, &game).await?;
        Ok(game)
    }

    pub async fn delete(&self, session: &SessionContext, game_id: &str) -> ApiResult<()> {
        // Loads first so a foreign game yields 403 rather than 404.
        self.load_owned(session, game_id).await?;
        self.documents
            .delete(&session.tenant_id, COLLECTION, game_id)
            .await?;
        tracing::debug!(game_id = %game_id, "deleted game");
        Ok(())
    }

    pub async fn add_round(
        &self,
        session: &SessionContext,
        game_id: &str,
        request: RoundRequest,
    ) -> ApiResult<Game> {
        let mut game = self.load_owned(session, game_id).await?;
        self.validate_scores(&game, &request.scores)?;

        game.rounds.push(GameRound {
            id: generate_id(),
            scores: request.scores,
        });
        game.is_complete = game.target_reached();

        self.write(session, &game).await?;
        Ok(game)
    }

    pub async fn edit_round(
        &self,
        session: &SessionContext,
        game_id: &str,
        round_id: &str,
        request: RoundRequest,
    ) -> ApiResult<Game> {
        let mut game = self.load_owned(session, game_id).await?;
        self.validate_scores(&game, &request.scores)?;

        let round = game
            .rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or_else(|| ApiError::NotFound("Round not found".to_string()))?;
        round.scores = request.scores;

        // Completion is recomputed, so lowering a score can reopen a
        // finished game.
        game.is_complete = game.target_reached();

        self.write(session, &game).await?;
        Ok(game)
    }

    pub async fn delete_round(
        &self,
        session: &SessionContext,
        game_id: &str,
        round_id: &str,
    ) -> ApiResult<Game> {
        let mut game = self.load_owned(session, game_id).await?;

        let position = game
            .rounds
            .iter()
            .position(|r| r.id == round_id)
            .ok_or_else(|| ApiError::NotFound("Round not found".to_string()))?;
        game.rounds.remove(position);
        game.is_complete = game.target_reached();

        self.write(session, &game).await?;
        Ok(game)
    }

    /// Marks a game finished regardless of the scores.
    pub async fn complete(&self, session: &SessionContext, game_id: &str) -> ApiResult<Game> {
        let mut game = self.load_owned(session, game_id).await?;
        game.is_complete = true;
        self.write(session, &game).await?;
        Ok(game)
    }

    async fn load_owned(&self, session: &SessionContext, game_id: &str) -> ApiResult<Game> {
        let data = self
            .documents
            .get(&session.tenant_id, COLLECTION, game_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;

        let game: Game = serde_json::from_value(data)
            .map_err(|e| ApiError::Internal(format!("corrupt game document: {e}")))?;

        if game.user_id != session.user_id.as_str() {
            return Err(ApiError::Forbidden(
                "Not authorized to access this game".to_string(),
            ));
        }
        Ok(game)
    }

    fn validate_scores(&self, game: &Game, scores: &HashMap<String, i64>) -> ApiResult<()> {
        for player_id in scores.keys() {
            if !game.players.iter().any(|p| &p.id == player_id) {
                return Err(ApiError::Validation(format!(
                    "Unknown player id '{player_id}'"
                )));
            }
        }
        Ok(())
    }

    async fn write(&self, session: &SessionContext, game: &Game) -> ApiResult<()> {
        let data = serde_json::to_value(game)
            .map_err(|e| ApiError::Internal(format!("failed to serialize game: {e}")))?;
        self.documents
            .set(&session.tenant_id, COLLECTION, &game.id, &data)
            .await?;
        Ok(())
    }
}
