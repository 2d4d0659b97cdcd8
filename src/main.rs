use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use std::str::FromStr;

use spoctl::{cli, config, error, host::HostContext, spotify::library::TimeRange, types::RepeatMode, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Sign out and clear stored credentials
    Logout,

    /// Show current playback
    Status(StatusOptions),

    /// Start or resume playback
    Play(PlayOptions),

    /// Pause playback
    Pause,

    /// Skip to the next track
    Next,

    /// Return to the previous track
    Previous,

    /// Seek within the current track
    Seek(SeekOptions),

    /// Set the playback volume
    Volume(VolumeOptions),

    /// Turn shuffle on or off
    Shuffle(ShuffleOptions),

    /// Set the repeat mode
    Repeat(RepeatOptions),

    /// List available playback devices
    Devices,

    /// Transfer playback to another device
    Transfer(TransferOptions),

    /// Show the playback queue
    Queue,

    /// Search the catalog
    Search(SearchOptions),

    /// Manage playlists
    Playlist(PlaylistOptions),

    /// Browse the library
    Library(LibraryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Authorize with Spotify API")]
pub struct AuthOptions {
    /// Subcommands under `auth` (e.g., `refresh`)
    #[command(subcommand)]
    pub command: Option<AuthSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthSubcommand {
    /// Exchange the stored refresh token for a new access token
    Refresh,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusOptions {
    /// Keep watching and print changes as they happen
    #[clap(long)]
    pub watch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Context URI to play (album, artist or playlist)
    #[clap(long)]
    pub context: Option<String>,

    /// Track URI to play; can be repeated
    #[clap(long = "track", action = ArgAction::Append)]
    pub tracks: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SeekOptions {
    /// Target position: seconds, MM:SS or H:MM:SS
    pub position: String,
}

#[derive(Parser, Debug, Clone)]
pub struct VolumeOptions {
    /// Volume in percent (0-100)
    pub level: u8,
}

#[derive(Parser, Debug, Clone)]
pub struct ShuffleOptions {
    /// on or off
    #[clap(value_parser = utils::parse_toggle)]
    pub state: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RepeatOptions {
    /// off, context or track
    #[clap(value_parser = RepeatMode::from_str)]
    pub mode: RepeatMode,
}

#[derive(Parser, Debug, Clone)]
pub struct TransferOptions {
    /// Target device id (see `spoctl devices`)
    pub device_id: String,

    /// Transfer without starting playback on the target
    #[clap(long)]
    pub paused: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    pub query: String,

    /// Result type(s) to include; comma-separated or `all`
    #[clap(long = "type", default_value = "track", value_parser = utils::parse_search_kinds)]
    pub types: utils::SearchKinds,

    /// Maximum results per type
    #[clap(long, default_value_t = 10)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// List your playlists
    List,

    /// Create a new playlist
    Create(PlaylistCreateOpts),

    /// Add tracks to a playlist
    Add(PlaylistTracksOpts),

    /// Remove tracks from a playlist
    Remove(PlaylistTracksOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistCreateOpts {
    /// Playlist name
    pub name: String,

    /// Playlist description
    #[clap(long)]
    pub description: Option<String>,

    /// Make the playlist public
    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistTracksOpts {
    /// Playlist id
    pub playlist_id: String,

    /// Track URIs
    #[clap(required = true)]
    pub uris: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryOptions {
    #[command(subcommand)]
    pub command: LibrarySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibrarySubcommand {
    /// Show liked songs
    Saved(LibraryLimitOpts),

    /// Show recently played tracks
    Recent(LibraryLimitOpts),

    /// Show your top tracks
    TopTracks(LibraryTopOpts),

    /// Show your top artists
    TopArtists(LibraryTopOpts),

    /// Add tracks to liked songs
    Save(LibraryIdsOpts),

    /// Remove tracks from liked songs
    Unsave(LibraryIdsOpts),

    /// Check whether tracks are in liked songs
    Contains(LibraryIdsOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryLimitOpts {
    /// Maximum number of entries
    #[clap(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryTopOpts {
    /// Affinity window: short, medium or long
    #[clap(long, default_value = "short", value_parser = TimeRange::from_str)]
    pub range: TimeRange,

    /// Maximum number of entries
    #[clap(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryIdsOpts {
    /// Track ids
    #[clap(required = true)]
    pub ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let host = HostContext::init();
    host.announce();

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => match opt.command {
            Some(AuthSubcommand::Refresh) => cli::refresh().await,
            None => cli::auth().await,
        },
        Command::Logout => cli::logout().await,
        Command::Status(opt) => cli::status(opt.watch).await,
        Command::Play(opt) => cli::play(opt.context, opt.tracks).await,
        Command::Pause => cli::pause().await,
        Command::Next => cli::next().await,
        Command::Previous => cli::previous().await,
        Command::Seek(opt) => cli::seek(opt.position).await,
        Command::Volume(opt) => cli::volume(opt.level).await,
        Command::Shuffle(opt) => cli::shuffle(opt.state).await,
        Command::Repeat(opt) => cli::repeat(opt.mode).await,
        Command::Devices => cli::devices().await,
        Command::Transfer(opt) => cli::transfer(opt.device_id, opt.paused).await,
        Command::Queue => cli::queue().await,
        Command::Search(opt) => cli::search(opt.query, opt.types, opt.limit).await,
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::List => cli::playlist_list().await,
            PlaylistSubcommand::Create(c) => {
                cli::playlist_create(c.name, c.description, c.public).await
            }
            PlaylistSubcommand::Add(t) => cli::playlist_add(t.playlist_id, t.uris).await,
            PlaylistSubcommand::Remove(t) => cli::playlist_remove(t.playlist_id, t.uris).await,
        },
        Command::Library(opt) => match opt.command {
            LibrarySubcommand::Saved(l) => cli::saved(l.limit).await,
            LibrarySubcommand::Recent(l) => cli::recent(l.limit).await,
            LibrarySubcommand::TopTracks(t) => cli::top_tracks(t.range, t.limit).await,
            LibrarySubcommand::TopArtists(t) => cli::top_artists(t.range, t.limit).await,
            LibrarySubcommand::Save(i) => cli::save(i.ids).await,
            LibrarySubcommand::Unsave(i) => cli::unsave(i.ids).await,
            LibrarySubcommand::Contains(i) => cli::contains(i.ids).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
