use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{get, middleware, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

use rs_markov_core::model::chain::{MAX_ORDER, MIN_ORDER};
use rs_markov_core::model::tokenizer::tokenize;
use rs_markov_core::{analyze, Analysis, GenerationInput, MarkovError, MarkovModel, NGramFrequency, Statistics};

mod config;

use config::ServerConfig;
use rs_markov_core::corpus::{list_corpora, load_corpus, Corpus, CorpusSummary};

const DEFAULT_ORDER: usize = 2;
const DEFAULT_LENGTH: usize = 50;
const DEFAULT_NGRAM_SIZE: usize = 2;
const DEFAULT_NGRAM_LIMIT: usize = 20;
const DEFAULT_CORPUS_NAME: &str = "Custom";

/// Model and corpus folder shared by all workers.
///
/// One model per server, so every request goes through the `Mutex`.
struct SharedData {
	model: MarkovModel,
	data_folder: PathBuf,
}

/// Body of `POST /api/train`.
#[derive(Deserialize)]
struct TrainRequest {
	text: Option<String>,
	order: Option<usize>,
	corpus_name: Option<String>,
}

impl TrainRequest {
	/// Returns the text and order to train with.
	fn validate(&self) -> Result<(&str, usize), String> {
		let text = match &self.text {
			Some(text) if !text.is_empty() => text.as_str(),
			_ => return Err("No text provided".to_owned()),
		};
		let order = self.order.unwrap_or(DEFAULT_ORDER);
		if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
			return Err(format!("Order must be an integer between {} and {}", MIN_ORDER, MAX_ORDER));
		}
		Ok((text, order))
	}
}

/// Body of `POST /api/generate`.
#[derive(Deserialize)]
struct GenerateRequest {
	length: Option<usize>,
	seed: Option<String>,
}

impl GenerateRequest {
	fn generation_input(&self) -> Result<GenerationInput, MarkovError> {
		Ok(GenerationInput::new(self.length.unwrap_or(DEFAULT_LENGTH))?.with_seed(self.seed.as_deref()))
	}
}

/// Body of `POST /api/ngrams`.
#[derive(Deserialize)]
struct NGramsRequest {
	n: Option<usize>,
	limit: Option<usize>,
}

/// Body of `POST /api/analyze`.
#[derive(Deserialize)]
struct AnalyzeRequest {
	text: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
	success: bool,
	error: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	error_type: Option<&'static str>,
}

#[derive(Serialize)]
struct HomeResponse {
	message: &'static str,
	version: &'static str,
	endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
struct CorpusesResponse {
	success: bool,
	corpuses: Vec<CorpusSummary>,
}

#[derive(Serialize)]
struct CorpusResponse {
	success: bool,
	corpus: Corpus,
}

#[derive(Serialize)]
struct TrainResponse {
	success: bool,
	message: String,
	statistics: Statistics,
}

#[derive(Serialize)]
struct GenerateResponse {
	success: bool,
	text: String,
	word_count: usize,
	seed_used: Option<String>,
}

#[derive(Serialize)]
struct StatisticsResponse {
	success: bool,
	statistics: Statistics,
}

#[derive(Serialize)]
struct NGramsResponse {
	success: bool,
	ngrams: Vec<NGramFrequency>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
	success: bool,
	analysis: Analysis,
}

fn failure(error: impl Into<String>) -> ErrorResponse {
	ErrorResponse { success: false, error: error.into(), error_type: None }
}

fn bad_request(error: impl Into<String>) -> HttpResponse {
	HttpResponse::BadRequest().json(failure(error))
}

fn lock_failed() -> HttpResponse {
	error!("Model lock poisoned");
	HttpResponse::InternalServerError().json(failure("Model lock failed"))
}

/// Maps a core error to its HTTP response.
///
/// Every core error is caused by the request, hence a 400.
fn markov_error(err: &MarkovError) -> HttpResponse {
	let mut body = failure(err.to_string());
	if let MarkovError::SeedNotFound { .. } = err {
		body.error_type = Some("invalid_seed");
	}
	HttpResponse::BadRequest().json(body)
}

/// HTTP GET endpoint `/api`
///
/// Describes the API.
#[get("/api")]
async fn get_home() -> impl Responder {
	let endpoints = BTreeMap::from([
		("GET /api/corpuses", "List available corpuses"),
		("GET /api/corpus/{key}", "Get a specific corpus"),
		("POST /api/train", "Train the Markov model"),
		("POST /api/generate", "Generate text"),
		("GET /api/statistics", "Get model statistics"),
		("POST /api/ngrams", "Get n-gram frequencies"),
		("POST /api/analyze", "Analyze text"),
	]);
	HttpResponse::Ok().json(HomeResponse {
		message: "Markov Chain Text Generator API",
		version: env!("CARGO_PKG_VERSION"),
		endpoints,
	})
}

#[get("/api/corpuses")]
async fn get_corpuses(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(shared_data) => shared_data.data_folder.clone(),
		Err(_) => return lock_failed(),
	};

	match list_corpora(&folder) {
		Ok(corpora) => HttpResponse::Ok().json(CorpusesResponse {
			success: true,
			corpuses: corpora.iter().map(Corpus::summary).collect(),
		}),
		Err(e) => {
			error!("Failed to list corpora in {}: {}", folder.display(), e);
			HttpResponse::InternalServerError().json(failure(format!("Failed to list corpuses: {e}")))
		}
	}
}

#[get("/api/corpus/{key}")]
async fn get_corpus(data: web::Data<Mutex<SharedData>>, key: web::Path<String>) -> impl Responder {
	let folder = match data.lock() {
		Ok(shared_data) => shared_data.data_folder.clone(),
		Err(_) => return lock_failed(),
	};

	match load_corpus(&folder, &key) {
		Ok(Some(corpus)) => HttpResponse::Ok().json(CorpusResponse { success: true, corpus }),
		Ok(None) => HttpResponse::NotFound().json(failure(format!("Corpus \"{}\" not found", key))),
		Err(e) => HttpResponse::InternalServerError().json(failure(format!("Failed to load corpus: {e}"))),
	}
}

/// HTTP POST endpoint `/api/train`
///
/// Trains the shared model, replacing the previous one.
#[post("/api/train")]
async fn post_train(data: web::Data<Mutex<SharedData>>, body: web::Json<TrainRequest>) -> impl Responder {
	let (text, order) = match body.validate() {
		Ok(v) => v,
		Err(e) => return bad_request(e),
	};
	let corpus_name = body.corpus_name.as_deref().unwrap_or(DEFAULT_CORPUS_NAME);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	match shared_data.model.train(text, order) {
		Ok(statistics) => {
			info!("Trained on '{}' (order {})", corpus_name, order);
			HttpResponse::Ok().json(TrainResponse {
				success: true,
				message: format!("Model trained successfully with {corpus_name}"),
				statistics,
			})
		}
		Err(e) => markov_error(&e),
	}
}

/// HTTP POST endpoint `/api/generate`
///
/// Generates text from the shared model, optionally seeded.
#[post("/api/generate")]
async fn post_generate(data: web::Data<Mutex<SharedData>>, body: web::Json<GenerateRequest>) -> impl Responder {
	let input = match body.generation_input() {
		Ok(input) => input,
		Err(e) => return markov_error(&e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	match shared_data.model.generate(&input) {
		Ok(text) => HttpResponse::Ok().json(GenerateResponse {
			success: true,
			word_count: tokenize(&text).len(),
			text,
			seed_used: body.seed.clone().filter(|seed| !seed.is_empty()),
		}),
		Err(e) => markov_error(&e),
	}
}

#[get("/api/statistics")]
async fn get_statistics(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	match shared_data.model.get_statistics() {
		Ok(statistics) => HttpResponse::Ok().json(StatisticsResponse { success: true, statistics }),
		Err(e) => markov_error(&e),
	}
}

#[post("/api/ngrams")]
async fn post_ngrams(data: web::Data<Mutex<SharedData>>, body: web::Json<NGramsRequest>) -> impl Responder {
	let n = body.n.unwrap_or(DEFAULT_NGRAM_SIZE);
	let limit = body.limit.unwrap_or(DEFAULT_NGRAM_LIMIT);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	match shared_data.model.get_ngram_frequencies(n, limit) {
		Ok(ngrams) => HttpResponse::Ok().json(NGramsResponse { success: true, ngrams }),
		Err(e) => markov_error(&e),
	}
}

/// HTTP POST endpoint `/api/analyze`
///
/// Does not touch the shared model.
#[post("/api/analyze")]
async fn post_analyze(body: web::Json<AnalyzeRequest>) -> impl Responder {
	match &body.text {
		Some(text) if !text.is_empty() => {
			HttpResponse::Ok().json(AnalyzeResponse { success: true, analysis: analyze(text) })
		}
		_ => bad_request("No text provided"),
	}
}

async fn not_found() -> HttpResponse {
	HttpResponse::NotFound().json(failure("Endpoint not found"))
}

/// Turns JSON extraction failures into the API error envelope.
fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
		let response = bad_request(format!("Invalid request body: {err}"));
		InternalError::from_response(err, response).into()
	})
}

fn shared_data<P: AsRef<Path>>(data_folder: P) -> web::Data<Mutex<SharedData>> {
	web::Data::new(Mutex::new(SharedData {
		model: MarkovModel::new(),
		data_folder: data_folder.as_ref().to_path_buf(),
	}))
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_home)
		.service(get_corpuses)
		.service(get_corpus)
		.service(post_train)
		.service(post_generate)
		.service(get_statistics)
		.service(post_ngrams)
		.service(post_analyze);
}

/// Main entry point for the server.
///
/// Creates an empty model, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - Address, port and corpus folder come from `ServerConfig::from_env`.
/// - Logging is configured through `RUST_LOG` (default `info`).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env();
	info!(
		"Starting Markov Chain API on http://{}:{} (corpora in {})",
		config.host,
		config.port,
		config.data_folder.display()
	);

	let shared_model = shared_data(&config.data_folder);

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.app_data(json_config())
			.configure(routes)
			.default_service(web::to(not_found))
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
