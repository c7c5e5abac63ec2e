//! Song + vocabulary video pairing: two embeds driven by one state struct,
//! with playlists persisted through a small key-value store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decode::header::{HeaderNormalization, Record};
use crate::error::{Error, Result};
use crate::table::Table;
use crate::video::{EmbedOptions, embed_url, youtube_id};

pub const LS_PLAYLISTS: &str = "voca_song_playlists";
pub const LS_ACTIVE: &str = "voca_song_active";
pub const LS_LOOP: &str = "voca_song_loop";

const UNTITLED: &str = "未命名 / Untitled";

/// Synchronous string store (browser local storage or an in-memory map)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    #[default]
    Noun,
    Verb,
    Adj,
}

impl WordType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "noun" => Some(WordType::Noun),
            "verb" => Some(WordType::Verb),
            "adj" => Some(WordType::Adj),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordType::Noun => "noun",
            WordType::Verb => "verb",
            WordType::Adj => "adj",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WordType::Noun => "名詞 / Noun",
            WordType::Verb => "動詞 / Verb",
            WordType::Adj => "形容詞 / Adjective",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub song_id: String,
    pub song_title: String,
    pub artist: String,
    pub lang: String,
    pub mv_url: String,
    pub noun_video: String,
    pub verb_video: String,
    pub adj_video: String,
}

impl Song {
    pub fn from_record(rec: &Record<'_>) -> Self {
        let field = |key: &str| rec.get(key).trim().to_string();
        Self {
            song_id: field("song_id"),
            song_title: field("song_title"),
            artist: field("artist"),
            lang: field("lang"),
            mv_url: field("mv_url"),
            noun_video: field("noun_video"),
            verb_video: field("verb_video"),
            adj_video: field("adj_video"),
        }
    }

    pub fn vocab_url(&self, word_type: WordType) -> &str {
        match word_type {
            WordType::Noun => &self.noun_video,
            WordType::Verb => &self.verb_video,
            WordType::Adj => &self.adj_video,
        }
    }
}

/// Song sheet rows keyed by trimmed header; rows without a `song_id` are dropped
pub fn songs(table: &Table) -> Vec<Song> {
    table
        .records(HeaderNormalization::Trimmed)
        .iter()
        .map(|r| Song::from_record(&r))
        .filter(|s| !s.song_id.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub song_id: String,
    #[serde(rename = "type")]
    pub word_type: WordType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub index: usize,
}

/// Sources for the music-video frame and the (muted) vocabulary frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frames {
    pub mv_src: String,
    pub vocab_src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PressOutcome {
    /// New frame sources, when the selection changed since the last load
    pub frames: Option<Frames>,
    /// Send the play command to both frames
    pub play: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlayingItem {
    pub title: String,
    pub type_label: String,
    pub active: bool,
}

/// Whole player state. Manual mode follows the song/type selectors; playlist
/// mode follows `active`. The load button works in two steps per selection:
/// the first press loads both frames, the next one starts them together.
pub struct Player<S: PreferenceStore> {
    store: S,
    songs: Vec<Song>,
    active: Option<Playlist>,
    loop_enabled: bool,
    manual: bool,
    manual_song: Option<String>,
    manual_type: WordType,
    loaded_key: Option<String>,
    loaded_once: bool,
}

impl<S: PreferenceStore> Player<S> {
    /// Restores the loop flag and the active playlist from the store
    pub fn new(store: S, songs: Vec<Song>) -> Self {
        let mut player = Self {
            store,
            songs,
            active: None,
            loop_enabled: false,
            manual: true,
            manual_song: None,
            manual_type: WordType::default(),
            loaded_key: None,
            loaded_once: false,
        };
        player.restore();
        player
    }

    /// Re-reads the loop flag and the active playlist. Unreadable values
    /// fall back to loop off and manual mode.
    pub fn restore(&mut self) {
        self.loop_enabled = self
            .store
            .get(LS_LOOP)
            .and_then(|v| serde_json::from_str(&v).ok())
            .unwrap_or(false);
        self.active = self
            .store
            .get(LS_ACTIVE)
            .and_then(|v| serde_json::from_str(&v).ok());
        self.manual = self.active.is_none();
        self.reset_two_step();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn active(&self) -> Option<&Playlist> {
        self.active.as_ref()
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Saved playlists; unreadable storage counts as none
    pub fn playlists(&self) -> Vec<Playlist> {
        self.store
            .get(LS_PLAYLISTS)
            .and_then(|v| serde_json::from_str(&v).ok())
            .unwrap_or_default()
    }

    fn save_playlists(&mut self, playlists: &[Playlist]) -> Result<()> {
        let json = serde_json::to_string(playlists)?;
        self.store.set(LS_PLAYLISTS, json);
        Ok(())
    }

    fn save_active(&mut self) -> Result<()> {
        match &self.active {
            Some(pl) => {
                let json = serde_json::to_string(pl)?;
                self.store.set(LS_ACTIVE, json);
            }
            None => self.store.remove(LS_ACTIVE),
        }
        Ok(())
    }

    fn reset_two_step(&mut self) {
        self.loaded_key = None;
        self.loaded_once = false;
    }

    fn song_index(&self, song_id: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.song_id == song_id)
    }

    fn selection(&self) -> Option<(usize, WordType)> {
        if self.manual || self.active.is_none() {
            let idx = match &self.manual_song {
                Some(id) => self.song_index(id)?,
                None if self.songs.is_empty() => return None,
                None => 0,
            };
            return Some((idx, self.manual_type));
        }
        let pl = self.active.as_ref()?;
        let item = pl.items.get(pl.index)?;
        Some((self.song_index(&item.song_id)?, item.word_type))
    }

    pub fn current(&self) -> Option<(&Song, WordType)> {
        self.selection().map(|(i, t)| (&self.songs[i], t))
    }

    fn apply_frames(&mut self, song_idx: usize, word_type: WordType) -> Option<Frames> {
        let song = &self.songs[song_idx];
        let mv_id = youtube_id(&song.mv_url).unwrap_or_default();
        let vocab_id = youtube_id(song.vocab_url(word_type)).unwrap_or_default();
        let key = format!(
            "{}__{}__{}__{}",
            song.song_id,
            word_type.as_str(),
            mv_id,
            vocab_id
        );
        if self.loaded_key.as_deref() == Some(key.as_str()) {
            return None;
        }
        let frames = Frames {
            mv_src: embed_url(&mv_id, &EmbedOptions::scripted(false)),
            vocab_src: embed_url(&vocab_id, &EmbedOptions::scripted(true)),
        };
        self.loaded_key = Some(key);
        self.loaded_once = false;
        Some(frames)
    }

    fn load_current(&mut self) -> Option<Frames> {
        self.reset_two_step();
        let (idx, word_type) = self.selection()?;
        self.apply_frames(idx, word_type)
    }

    /// User touched the song or type selector: back to manual mode
    pub fn select_manual(&mut self, song_id: &str, word_type: WordType) -> Result<()> {
        self.manual = true;
        self.manual_song = Some(song_id.to_string());
        self.manual_type = word_type;
        self.active = None;
        self.save_active()?;
        self.reset_two_step();
        Ok(())
    }

    pub fn press_load(&mut self) -> Option<PressOutcome> {
        let (idx, word_type) = self.selection()?;
        let frames = self.apply_frames(idx, word_type);
        let play = if self.loaded_once {
            true
        } else {
            self.loaded_once = true;
            false
        };
        Some(PressOutcome { frames, play })
    }

    /// Advance the playlist; at the end it wraps with loop on, otherwise stays put
    pub fn next(&mut self) -> Result<Option<Frames>> {
        let loop_enabled = self.loop_enabled;
        let Some(pl) = self.active.as_mut().filter(|p| !p.items.is_empty()) else {
            return Ok(None);
        };
        self.manual = false;
        if pl.index + 1 >= pl.items.len() {
            if !loop_enabled {
                pl.index = pl.items.len() - 1;
                return Ok(None);
            }
            pl.index = 0;
        } else {
            pl.index += 1;
        }
        self.save_active()?;
        Ok(self.load_current())
    }

    pub fn prev(&mut self) -> Result<Option<Frames>> {
        let loop_enabled = self.loop_enabled;
        let Some(pl) = self.active.as_mut().filter(|p| !p.items.is_empty()) else {
            return Ok(None);
        };
        self.manual = false;
        if pl.index == 0 {
            if !loop_enabled {
                return Ok(None);
            }
            pl.index = pl.items.len() - 1;
        } else {
            pl.index = (pl.index - 1).min(pl.items.len() - 1);
        }
        self.save_active()?;
        Ok(self.load_current())
    }

    /// Jump to an entry of the active playlist
    pub fn jump(&mut self, index: usize) -> Result<Option<Frames>> {
        let Some(pl) = self.active.as_mut() else {
            return Ok(None);
        };
        if index >= pl.items.len() {
            return Ok(None);
        }
        pl.index = index;
        self.manual = false;
        self.save_active()?;
        Ok(self.load_current())
    }

    pub fn toggle_loop(&mut self) -> Result<bool> {
        self.loop_enabled = !self.loop_enabled;
        let json = serde_json::to_string(&self.loop_enabled)?;
        self.store.set(LS_LOOP, json);
        Ok(self.loop_enabled)
    }

    /// Store the checked songs as a playlist of one word type and switch to it.
    /// `id_seed` makes the id unique (the browser passes the current time).
    pub fn save_playlist(
        &mut self,
        name: &str,
        song_ids: &[String],
        word_type: WordType,
        id_seed: u64,
    ) -> Result<Option<Frames>> {
        if song_ids.is_empty() {
            return Err(Error::Message(
                "請勾選歌曲 / Please select at least one song".to_string(),
            ));
        }
        let base = match name.trim() {
            "" => UNTITLED,
            n => n,
        };
        let playlist = Playlist {
            id: format!("pl_{}", id_seed),
            name: format!("{}（{}）", base, word_type.label()),
            items: song_ids
                .iter()
                .map(|id| PlaylistItem {
                    song_id: id.clone(),
                    word_type,
                })
                .collect(),
            index: 0,
        };
        let mut all = self.playlists();
        all.push(playlist.clone());
        self.save_playlists(&all)?;

        self.active = Some(playlist);
        self.manual = false;
        self.save_active()?;
        Ok(self.load_current())
    }

    pub fn load_playlist(&mut self, id: &str) -> Result<Option<Frames>> {
        let Some(mut playlist) = self.playlists().into_iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        playlist.index = 0;
        self.active = Some(playlist);
        self.manual = false;
        self.save_active()?;
        Ok(self.load_current())
    }

    pub fn delete_playlist(&mut self, id: &str) -> Result<()> {
        let remaining: Vec<Playlist> = self
            .playlists()
            .into_iter()
            .filter(|p| p.id != id)
            .collect();
        self.save_playlists(&remaining)?;
        if self.active.as_ref().is_some_and(|p| p.id == id) {
            self.active = None;
            self.manual = true;
            self.save_active()?;
            self.reset_two_step();
        }
        Ok(())
    }

    /// Entries of the active playlist whose song still exists
    pub fn now_playing(&self) -> Vec<NowPlayingItem> {
        let Some(pl) = &self.active else {
            return Vec::new();
        };
        pl.items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let song = &self.songs[self.song_index(&item.song_id)?];
                Some(NowPlayingItem {
                    title: format!("{} ({})", song.song_title, item.word_type.label()),
                    type_label: item.word_type.label().to_string(),
                    active: i == pl.index,
                })
            })
            .collect()
    }
}
