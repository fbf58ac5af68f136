use std::future::Future;
use std::io::IsTerminal;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::watch;

use crate::app::{AppContext, ErrorKind, ReelError, Result};
use crate::cli::render;
use crate::cli::ProfileAction;
use crate::client::CatalogClient;
use crate::controller::{FetchController, FetchState};
use crate::domain::{Movie, MovieSummary, ProfileUpdate};
use crate::store::{load_profile, save_profile, KeyValueStore};

/// Search results tagged with the query that produced them.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub movies: Vec<MovieSummary>,
}

impl SearchOutcome {
    fn render(&self) -> String {
        if self.movies.is_empty() {
            return format!("No movies found for {}", self.query);
        }
        format!(
            "Search Results for {}\n{}",
            self.query,
            render::render_results(&self.movies)
        )
    }
}

/// Run `operation` once through a controller and hand back what it settled on.
async fn run_once<T, F, Fut>(operation: F) -> Result<Option<Arc<T>>>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let controller = FetchController::new(operation, true);

    if controller.is_loading() && std::io::stderr().is_terminal() {
        eprintln!("{}", render::LOADING);
    }

    match controller.settled().await {
        FetchState::Success(data) => Ok(Some(data)),
        FetchState::Failure(info) => Err(ReelError::Fetch(info)),
        FetchState::Idle | FetchState::Loading => Ok(None),
    }
}

pub async fn load_popular(ctx: &AppContext) -> Result<Option<Arc<Vec<MovieSummary>>>> {
    let client = ctx.client.clone();
    run_once(move || {
        let client = client.clone();
        async move { Ok::<_, ReelError>(client.popular().await?.collect::<Vec<_>>()) }
    })
    .await
}

pub async fn load_search(ctx: &AppContext, query: &str) -> Result<Option<Arc<SearchOutcome>>> {
    let client = ctx.client.clone();
    let query = query.to_string();
    run_once(move || search_once(client.clone(), query.clone())).await
}

pub async fn load_movie(ctx: &AppContext, id: &str) -> Result<Option<Arc<Movie>>> {
    let client = ctx.client.clone();
    let id = id.to_string();
    run_once(move || {
        let client = client.clone();
        let id = id.clone();
        async move { client.get_by_id(&id).await }
    })
    .await
}

async fn search_once(
    client: Arc<dyn CatalogClient + Send + Sync>,
    query: String,
) -> Result<SearchOutcome> {
    let movies = client.search(&query).await?.collect();
    Ok(SearchOutcome {
        query: query.trim().to_string(),
        movies,
    })
}

pub async fn popular(ctx: &AppContext) -> Result<()> {
    if let Some(movies) = load_popular(ctx).await? {
        println!("Popular movies\n{}", render::render_results(&movies));
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    if let Some(outcome) = load_search(ctx, query).await? {
        println!("{}", outcome.render());
    }
    Ok(())
}

pub async fn show_movie(ctx: &AppContext, id: &str) -> Result<()> {
    if let Some(movie) = load_movie(ctx, id).await? {
        println!(
            "{}",
            render::render_movie(&movie, &ctx.config.api.image_base_url)
        );
    }
    Ok(())
}

pub async fn open_imdb(ctx: &AppContext, id: &str) -> Result<()> {
    let Some(movie) = load_movie(ctx, id).await? else {
        return Ok(());
    };

    let url = movie
        .imdb_url()
        .ok_or_else(|| ReelError::NotFound(format!("IMDb page for movie {}", movie.id)))?;

    println!("Opening {}", url);
    open::that(&url)?;
    Ok(())
}

pub async fn interactive_search(ctx: &AppContext) -> Result<()> {
    println!("Type a title and press Enter (:q to quit)");
    let mut stdout = tokio::io::stdout();
    prompt_search(
        ctx.client.clone(),
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await
}

/// Prompt loop: every line read from `input` becomes the new query and
/// re-triggers one controller. Results of superseded queries are never
/// written to `out`.
///
/// `:q` stops at once and drops whatever is still in flight. End of input
/// waits for the last query to settle first.
pub async fn prompt_search<R, W>(
    client: Arc<dyn CatalogClient + Send + Sync>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (query_tx, query_rx) = watch::channel(String::new());
    let controller = FetchController::new(
        move || search_once(client.clone(), query_rx.borrow().clone()),
        false,
    );
    let mut updates = controller.subscribe();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            biased;

            line = lines.next_line() => match line? {
                Some(line) if line.trim() == ":q" => break,
                Some(line) => {
                    query_tx.send_replace(line);
                    controller.refetch();
                }
                None => {
                    controller.settled().await;
                    if updates.has_changed().unwrap_or(false) {
                        let state = updates.borrow_and_update().clone();
                        write_state(out, &state).await?;
                    }
                    break;
                }
            },

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                write_state(out, &state).await?;
            }
        }
    }

    controller.dispose();
    Ok(())
}

async fn write_state<W: AsyncWrite + Unpin>(
    out: &mut W,
    state: &FetchState<SearchOutcome>,
) -> Result<()> {
    let text = render::render_state(state, SearchOutcome::render);
    if !text.is_empty() {
        out.write_all(format!("{}\n", text).as_bytes()).await?;
        out.flush().await?;
    }
    Ok(())
}

pub fn profile<S: KeyValueStore + ?Sized>(store: &S, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let profile = load_profile(store)?;
            println!("{}", render::render_profile(&profile));
        }
        ProfileAction::Set {
            name,
            username,
            bio,
            email,
            picture,
        } => {
            let update = ProfileUpdate {
                name,
                username,
                bio,
                email,
                profile_pic: picture,
            };
            if update.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            update_profile(store, update)?;
            println!("Profile updated!");
        }
    }
    Ok(())
}

pub fn update_profile<S: KeyValueStore + ?Sized>(store: &S, update: ProfileUpdate) -> Result<()> {
    let mut profile = match load_profile(store) {
        Ok(profile) => profile,
        Err(e) if e.kind() == ErrorKind::Parse => {
            tracing::warn!("Discarding unreadable saved profile: {}", e);
            Default::default()
        }
        Err(e) => return Err(e),
    };
    profile.apply(update);
    save_profile(store, &profile)
}
