//! Saved game record - the JSON shape kept in the store
//!
//! ```text
//! {
//!   "dataTiles": [ { "position": { "x": 0, "y": 0 }, "number": 2 }, ... ],   // all N*N cells, zeros included
//!   "scores":    { "score": 12, "bestScore": 40 },
//!   "moves":     [ { "direction": 37, "spawnedTile": { "position": {...}, "number": 2 } }, ... ],
//!   "autoTiles": [ ... ]                                                   // the two seed tiles
//! }
//! ```
//!
//! `position.x` is the row and `position.y` the column. `direction` is a key code:
//! 37 left, 38 up, 39 right, 40 down.

use serde::{Deserialize, Serialize};

use crate::core::{Grid, SavedSession, Score};
use crate::error::PersistError;
use crate::types::{is_tile_value, Direction, MoveRecord, Position, Tile, CELL_COUNT, GRID_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub position: PositionRecord,
    pub number: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresRecord {
    pub score: i64,
    pub best_score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecordJson {
    pub direction: i64,
    pub spawned_tile: Option<TileRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub data_tiles: Vec<TileRecord>,
    pub scores: ScoresRecord,
    pub moves: Vec<MoveRecordJson>,
    pub auto_tiles: Vec<TileRecord>,
}

impl From<Tile> for TileRecord {
    fn from(tile: Tile) -> Self {
        Self {
            position: PositionRecord {
                x: tile.position.row as i64,
                y: tile.position.col as i64,
            },
            number: tile.value as i64,
        }
    }
}

impl TileRecord {
    fn to_tile(self) -> Result<Tile, PersistError> {
        let in_range = |v: i64| (0..GRID_SIZE as i64).contains(&v);
        if !in_range(self.position.x) || !in_range(self.position.y) {
            return Err(PersistError::invalid(format!(
                "position ({}, {}) is outside the grid",
                self.position.x, self.position.y
            )));
        }
        let value = u32::try_from(self.number)
            .ok()
            .filter(|&v| is_tile_value(v))
            .ok_or_else(|| PersistError::invalid(format!("{} is not a tile value", self.number)))?;
        Ok(Tile::new(
            Position::new(self.position.x as u8, self.position.y as u8),
            value,
        ))
    }
}

fn score_value(v: i64, name: &str) -> Result<u32, PersistError> {
    u32::try_from(v).map_err(|_| PersistError::invalid(format!("{name} {v} is out of range")))
}

impl GameRecord {
    /// Build the record for a session
    pub fn from_saved(saved: &SavedSession) -> Self {
        let data_tiles = (0..CELL_COUNT)
            .map(|i| {
                let position = Position::from_index(i);
                TileRecord::from(Tile::new(position, saved.grid.get(position)))
            })
            .collect();

        Self {
            data_tiles,
            scores: ScoresRecord {
                score: saved.score.current as i64,
                best_score: saved.score.best as i64,
            },
            moves: saved
                .moves
                .iter()
                .map(|m| MoveRecordJson {
                    direction: m.direction.key_code() as i64,
                    spawned_tile: m.spawned.map(TileRecord::from),
                })
                .collect(),
            auto_tiles: saved.seed_tiles.iter().copied().map(TileRecord::from).collect(),
        }
    }

    /// Validate the record and convert it back.
    ///
    /// `dataTiles` must list every cell exactly once.
    pub fn into_saved(self) -> Result<SavedSession, PersistError> {
        if self.data_tiles.len() != CELL_COUNT {
            return Err(PersistError::invalid(format!(
                "expected {CELL_COUNT} data tiles, found {}",
                self.data_tiles.len()
            )));
        }
        let tiles = self
            .data_tiles
            .into_iter()
            .map(TileRecord::to_tile)
            .collect::<Result<Vec<_>, _>>()?;
        let grid = Grid::try_from_tiles(&tiles)
            .ok_or_else(|| PersistError::invalid("data tiles repeat a position"))?;

        let moves = self
            .moves
            .into_iter()
            .map(|m| {
                let direction = u32::try_from(m.direction)
                    .ok()
                    .and_then(Direction::from_key_code)
                    .ok_or_else(|| {
                        PersistError::invalid(format!("unknown direction code {}", m.direction))
                    })?;
                let spawned = m.spawned_tile.map(TileRecord::to_tile).transpose()?;
                Ok(MoveRecord { direction, spawned })
            })
            .collect::<Result<Vec<_>, PersistError>>()?;

        let seed_tiles = self
            .auto_tiles
            .into_iter()
            .map(TileRecord::to_tile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SavedSession {
            grid,
            score: Score::new(
                score_value(self.scores.score, "score")?,
                score_value(self.scores.best_score, "bestScore")?,
            ),
            moves,
            seed_tiles,
        })
    }
}

/// Serialize a session to the stored JSON string
pub fn to_json(saved: &SavedSession) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&GameRecord::from_saved(saved))?)
}

/// Parse and validate a stored JSON string
pub fn from_json(json: &str) -> Result<SavedSession, PersistError> {
    serde_json::from_str::<GameRecord>(json)?.into_saved()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SavedSession {
        let seeds = vec![
            Tile::new(Position::new(0, 0), 2),
            Tile::new(Position::new(0, 1), 2),
        ];
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), 4);
        grid.set(Position::new(3, 3), 2);
        SavedSession {
            grid,
            score: Score::new(4, 10),
            moves: vec![MoveRecord {
                direction: Direction::Left,
                spawned: Some(Tile::new(Position::new(3, 3), 2)),
            }],
            seed_tiles: seeds,
        }
    }

    #[test]
    fn test_shape_uses_expected_field_names() {
        let json = to_json(&sample()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["dataTiles"].as_array().unwrap().len(), CELL_COUNT);
        assert_eq!(v["dataTiles"][0]["position"]["x"], 0);
        assert_eq!(v["dataTiles"][0]["position"]["y"], 0);
        assert_eq!(v["dataTiles"][0]["number"], 4);
        assert_eq!(v["dataTiles"][1]["number"], 0);
        assert_eq!(v["scores"]["score"], 4);
        assert_eq!(v["scores"]["bestScore"], 10);
        assert_eq!(v["moves"][0]["direction"], 37);
        assert_eq!(v["moves"][0]["spawnedTile"]["position"]["x"], 3);
        assert_eq!(v["autoTiles"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_null_spawned_tile() {
        let mut saved = sample();
        saved.moves[0].spawned = None;
        let json = to_json(&saved).unwrap();
        assert!(json.contains("\"spawnedTile\":null"));
        assert_eq!(from_json(&json).unwrap().moves[0].spawned, None);
    }

    #[test]
    fn test_parse_back() {
        let saved = sample();
        assert_eq!(from_json(&to_json(&saved).unwrap()).unwrap(), saved);
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let err = from_json(r#"{"dataTiles":[],"scores":{"score":0,"bestScore":0},"moves":[]}"#)
            .unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut record = GameRecord::from_saved(&sample());
        record.data_tiles[5].number = 3;
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));

        let mut record = GameRecord::from_saved(&sample());
        record.moves[0].direction = 41;
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));

        let mut record = GameRecord::from_saved(&sample());
        record.data_tiles[1].position = PositionRecord { x: 0, y: 0 };
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));

        let mut record = GameRecord::from_saved(&sample());
        record.data_tiles.pop();
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));

        let mut record = GameRecord::from_saved(&sample());
        record.scores.score = -1;
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));

        let mut record = GameRecord::from_saved(&sample());
        record.auto_tiles[0].position.y = 9;
        assert!(matches!(record.into_saved(), Err(PersistError::Invalid(_))));
    }
}
