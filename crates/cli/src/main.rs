use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use models::{FeedbackAction, MovieId, MovieIndex, MovieRecord, MovieReference};
use server::{ProfileCreateRequest, RecommendationOrchestrator, RecommendationPage, RecommenderConfig};
use sources::{CatalogGateway, InMemoryCatalog, JsonFileProfileStore, TmdbCatalog};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::{TmdbClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use tracing::info;

/// CineMatch - content-based movie recommendations
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Movie recommendations from a learned taste profile", long_about = None)]
struct Cli {
    /// Offline catalog snapshot (JSON); the live TMDB API is used when absent
    #[arg(long, global = true, env = "CINEMATCH_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// TMDB API key (required without --snapshot)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// TMDB API root
    #[arg(long, global = true, env = "TMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    tmdb_base_url: String,

    /// Directory holding profile documents and the interaction log
    #[arg(long, global = true, env = "CINEMATCH_PROFILES_DIR", default_value = "data/profiles")]
    profiles_dir: PathBuf,

    /// Engine configuration (TOML)
    #[arg(long, global = true, env = "CINEMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile from favorite movies and preferences
    Onboard {
        user_id: String,

        #[arg(long)]
        email: Option<String>,

        /// Favorite movie id (repeatable)
        #[arg(long = "favorite", value_name = "MOVIE_ID")]
        favorites: Vec<MovieId>,

        /// Preferred genre name (repeatable)
        #[arg(long = "genre", value_name = "NAME")]
        genres: Vec<String>,

        /// Preferred actor name (repeatable)
        #[arg(long = "actor", value_name = "NAME")]
        actors: Vec<String>,
    },

    /// Show a stored profile
    Profile { user_id: String },

    /// Get movie recommendations for a user
    Recommend {
        user_id: String,

        /// Number of recommendations to return (max 50)
        #[arg(long)]
        limit: Option<usize>,

        /// Popular-listing page to draw candidates from
        #[arg(long, default_value = "1")]
        page: u32,

        /// Show the signal breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Like or dislike a movie
    Feedback {
        user_id: String,
        movie_id: MovieId,
        /// "like" or "dislike"; anything else is recorded without changing weights
        action: String,
    },

    /// Show a user's feedback history
    History { user_id: String },

    /// List popular movies
    Popular {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Search movies by title
    Search {
        query: String,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show full details of one movie
    Movie { movie_id: MovieId },

    /// List catalog genres
    Genres,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let orchestrator = build_orchestrator(&cli).await?;
    let json = cli.json;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Onboard {
            user_id,
            email,
            favorites,
            genres,
            actors,
        } => {
            let request = ProfileCreateRequest {
                user_id,
                email,
                favorite_movies: favorites
                    .into_iter()
                    .map(|id| MovieReference { id, title: String::new() })
                    .collect(),
                preferred_genres: genres,
                preferred_actors: actors,
            };
            let profile = orchestrator.create_profile(request).await?;
            if json {
                print_json(&profile)?;
            } else {
                println!("{} Created profile for {}", "✓".green(), profile.user_id.bold());
                print_weights("Genre weights", &profile.genre_weights);
                print_weights("Actor weights", &profile.actor_weights);
            }
        }
        Commands::Profile { user_id } => {
            let profile = orchestrator.get_profile(&user_id).await?;
            if json {
                print_json(&profile)?;
            } else {
                println!("{}", format!("Profile: {}", profile.user_id).bold().blue());
                if let Some(email) = &profile.email {
                    println!("{}Email: {}", "• ".green(), email);
                }
                let favorites: Vec<String> = profile
                    .favorite_movies
                    .iter()
                    .map(|m| format!("{} ({})", m.title, m.id))
                    .collect();
                println!("{}Favorites: {}", "• ".green(), favorites.join(", "));
                println!("{}Preferred genres: {}", "• ".green(), profile.preferred_genres.join(", "));
                println!("{}Preferred actors: {}", "• ".green(), profile.preferred_actors.join(", "));
                print_weights("Genre weights", &profile.genre_weights);
                print_weights("Actor weights", &profile.actor_weights);
            }
        }
        Commands::Recommend {
            user_id,
            limit,
            page,
            explain,
        } => {
            let start = Instant::now();
            let recommendations = orchestrator.get_recommendations(&user_id, limit, page).await?;
            if json {
                print_json(&recommendations)?;
            } else {
                print_recommendations(&recommendations, explain);
                println!("{}", format!("({:.2?})", start.elapsed()).dimmed());
            }
        }
        Commands::Feedback {
            user_id,
            movie_id,
            action,
        } => {
            let action = FeedbackAction::from(action.to_lowercase());
            let weights = orchestrator.record_feedback(&user_id, movie_id, action.clone()).await?;
            if json {
                print_json(&weights)?;
            } else {
                println!("{} Recorded {} on movie {}", "✓".green(), action, movie_id);
                print_weights("Genre weights", &weights.genre_weights);
                print_weights("Actor weights", &weights.actor_weights);
            }
        }
        Commands::History { user_id } => {
            let history = orchestrator.interactions(&user_id).await?;
            if json {
                print_json(&history)?;
            } else {
                println!("{}", format!("History for {}:", user_id).bold().blue());
                for interaction in &history {
                    println!(
                        "  {} {:<8} movie {}",
                        interaction.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        interaction.action.to_string(),
                        interaction.movie_id
                    );
                }
            }
        }
        Commands::Popular { page, min_rating } => {
            let movies = orchestrator.popular(page, min_rating).await?;
            print_movies(&format!("Popular movies (page {})", page), &movies, json)?;
        }
        Commands::Search { query, page } => {
            let movies = orchestrator.search(&query, page).await?;
            print_movies(&format!("Search results for '{}'", query), &movies, json)?;
        }
        Commands::Movie { movie_id } => {
            let movie = orchestrator.movie_details(movie_id).await?;
            if json {
                print_json(&movie)?;
            } else {
                print_movie_details(&movie);
            }
        }
        Commands::Genres => {
            let genres = orchestrator.genres().await?;
            if json {
                print_json(&genres)?;
            } else {
                for genre in genres {
                    println!("{:>6}  {}", genre.id, genre.name);
                }
            }
        }
    }

    Ok(())
}

/// Wire catalog, store and configuration from the global options.
async fn build_orchestrator(cli: &Cli) -> Result<RecommendationOrchestrator> {
    let config = match &cli.config {
        Some(path) => RecommenderConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RecommenderConfig::default(),
    };

    let catalog: Arc<dyn CatalogGateway> = match &cli.snapshot {
        Some(path) => {
            let start = Instant::now();
            let index = MovieIndex::load_from_file(path)
                .with_context(|| format!("Failed to load catalog snapshot {}", path.display()))?;
            info!("Loaded {} movies from snapshot in {:?}", index.len(), start.elapsed());
            Arc::new(InMemoryCatalog::new(Arc::new(index)))
        }
        None => {
            let api_key = cli
                .tmdb_api_key
                .clone()
                .context("TMDB_API_KEY (or --tmdb-api-key) is required unless --snapshot is given")?;
            let client = TmdbClient::with_base_url(api_key, cli.tmdb_base_url.clone(), DEFAULT_TIMEOUT)?;
            Arc::new(TmdbCatalog::new(client))
        }
    };

    let store = JsonFileProfileStore::open(&cli.profiles_dir)
        .await
        .with_context(|| format!("Failed to open profile store {}", cli.profiles_dir.display()))?;

    Ok(RecommendationOrchestrator::new(catalog, Arc::new(store), config))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_weights(label: &str, weights: &models::WeightMap) {
    let mut entries: Vec<(&String, &f64)> = weights.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("{}", format!("{}:", label).bold());
    for (name, weight) in entries {
        println!("  {:<28} {:.3}", name, weight);
    }
}

fn year_of(movie: &MovieRecord) -> &str {
    movie
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .unwrap_or("????")
}

fn print_movies(title: &str, movies: &[MovieRecord], json: bool) -> Result<()> {
    if json {
        return print_json(&movies);
    }
    println!("{}", format!("{}:", title).bold().blue());
    for movie in movies {
        println!(
            "{:>8}: {} ({}) - {:.1}/10, popularity {:.1}",
            movie.id,
            movie.title,
            year_of(movie),
            movie.vote_average,
            movie.popularity
        );
    }
    Ok(())
}

fn print_movie_details(movie: &MovieRecord) {
    println!("{} ({})", movie.title.bold().blue(), year_of(movie));
    println!("{}Genres: {}", "• ".green(), movie.genres.join(", "));
    println!("{}Cast: {}", "• ".green(), movie.top_cast(5).join(", "));
    if let Some(director) = movie.director() {
        println!("{}Director: {}", "• ".green(), director);
    }
    println!("{}Rating: {:.1}/10", "• ".cyan(), movie.vote_average);
    println!("{}Popularity: {:.1}", "• ".cyan(), movie.popularity);
    if let Some(imdb_id) = &movie.imdb_id {
        println!("{}IMDb: https://www.imdb.com/title/{}/", "• ".cyan(), imdb_id);
    }
    if !movie.keywords.is_empty() {
        println!("{}Keywords: {}", "• ".cyan(), movie.keywords.join(", "));
    }
    if let Some(overview) = &movie.overview {
        println!("\n{}", overview);
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(page: &RecommendationPage, explain: bool) {
    println!(
        "{}",
        format!("Recommendations for {} (page {}):", page.user_id, page.page)
            .bold()
            .blue()
    );
    for (i, rec) in page.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.movie.title,
            year_of(&rec.movie),
            rec.genres.join(", "),
            rec.score
        );
        if explain {
            let b = &rec.breakdown;
            println!("   Starring: {}", rec.actors.join(", "));
            println!(
                "   genre {:.2} | actor {:.2} | content {:.2} | rating {:.2} | recency {:.2} | confidence {:.2}",
                b.genre, b.actor, b.content, b.rating, b.recency, rec.confidence
            );
        }
    }
    if page.recommendations.is_empty() {
        println!("  (no candidates on this page)");
    }
}
