#[doc(hidden)]
mod config;
#[doc(hidden)]
mod error;
pub mod github_api;
#[doc(hidden)]
mod models;

pub use config::Config;
pub use error::Error;
pub use models::*;

/// The workflow that updates the stock prices, relative to `.github/workflows/`.
const UPDATE_PRICES_WORKFLOW: &str = "update_prices.yml";
/// The branch the workflow runs on.
const UPDATE_PRICES_REF: &str = "main";

const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
const MISSING_CREDENTIALS_MESSAGE: &str = "GitHub environment variables are not configured";
const UPDATE_STARTED_MESSAGE: &str = "Stock price update started. It will complete in 1-2 minutes.";
const DISPATCH_FAILED_MESSAGE: &str = "could not trigger GitHub Actions workflow";
const INTERNAL_SERVER_ERROR_MESSAGE: &str = "internal server error";

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	pretty_env_logger::init();

	// Read the configuration from the environment once, all requests share it
	let config = Config::from_env()?;

	let github_api_client = github_api::Client::from_config(config.github_api)?;

	log::info!("listening for update requests on {}", config.listen_address);
	warp::serve(routes(github_api_client)).run(config.listen_address).await;

	Ok(())
}

/// All routes of this service, including rejection handling and CORS headers.
///
/// # Arguments
/// - `github_api_client`: A handle to the GitHub API client.
fn routes(github_api_client: github_api::Client)
	-> impl warp::Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone
{
	use warp::Filter as _;

	let trigger_update_route =
		warp::path!("api" / "trigger-update")
		// Accept all methods here, the handler answers preflight requests and rejects the rest itself
		.and(warp::method())
		// Pass on a handle to the GitHub API client
		.and(warp::any().map(move || github_api_client.clone()))
		.and_then(handle_trigger_update);

	trigger_update_route
		.recover(handle_rejection)
		// Browsers need these on every response, preflight or not, successful or not
		.with(warp::reply::with::headers(cors_headers()))
		.with(warp::log("price_update_trigger"))
}

/// CORS headers attached to every response.
fn cors_headers() -> warp::http::HeaderMap
{
	use warp::http::header::{self, HeaderValue};

	let mut headers = warp::http::HeaderMap::new();

	headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
	headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
	headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS,
		HeaderValue::from_static("GET,OPTIONS,PATCH,DELETE,POST,PUT"));
	headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS,
		HeaderValue::from_static("X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
			Content-Length, Content-MD5, Content-Type, Date, X-Api-Version"));

	headers
}

/// Request handler for update requests.
///
/// # Arguments
/// - `method`: The HTTP method of the request.
/// - `github_api_client`: A handle to the GitHub API client.
async fn handle_trigger_update(method: warp::http::Method, github_api_client: github_api::Client)
	-> Result<warp::reply::Response, std::convert::Infallible>
{
	use warp::Reply as _;

	// Answer CORS preflight requests with an empty body
	if method == warp::http::Method::OPTIONS
	{
		return Ok(warp::reply::with_status(warp::reply(), warp::http::StatusCode::OK)
			.into_response());
	}

	if method != warp::http::Method::POST
	{
		let response = ErrorResponse{error: METHOD_NOT_ALLOWED_MESSAGE, ..Default::default()};

		return Ok(json_response(&response, warp::http::StatusCode::METHOD_NOT_ALLOWED));
	}

	match trigger_update(&github_api_client).await
	{
		Ok(()) =>
		{
			let response = SuccessResponse{success: true, message: UPDATE_STARTED_MESSAGE};

			Ok(json_response(&response, warp::http::StatusCode::OK))
		},
		Err(error) => Ok(error_response(error)),
	}
}

/// Dispatch the stock price update workflow.
async fn trigger_update(github_api_client: &github_api::Client) -> Result<(), crate::Error>
{
	let request_body = WorkflowDispatchRequest{ref_: UPDATE_PRICES_REF};

	github_api_client.dispatch_workflow(UPDATE_PRICES_WORKFLOW, &request_body).await?;

	log::info!("dispatched workflow “{UPDATE_PRICES_WORKFLOW}” on ref “{UPDATE_PRICES_REF}”");

	Ok(())
}

/// Turn an error that occurred while triggering an update into a response for the caller.
fn error_response(error: crate::Error) -> warp::reply::Response
{
	let status_code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;

	let response = match error
	{
		crate::Error::MissingCredentials(presence) =>
		{
			log::error!("cannot trigger update, GitHub API credentials are not configured");

			ErrorResponse
			{
				error: MISSING_CREDENTIALS_MESSAGE,
				debug: Some(presence),
				..Default::default()
			}
		},
		crate::Error::WorkflowDispatchRejected{status_code: upstream_status_code, response_body} =>
		{
			log::error!("GitHub API rejected workflow dispatch with status code \
				{upstream_status_code}: {response_body}");

			ErrorResponse
			{
				error: DISPATCH_FAILED_MESSAGE,
				details: Some(response_body),
				status: Some(upstream_status_code.as_u16()),
				..Default::default()
			}
		},
		// Anything else is unexpected, so report the whole error chain to the caller and the log
		error =>
		{
			let error = anyhow::Error::from(error);

			log::error!("unhandled error: {:?}", error);

			ErrorResponse
			{
				error: INTERNAL_SERVER_ERROR_MESSAGE,
				message: Some(format!("{:#}", error)),
				..Default::default()
			}
		},
	};

	json_response(&response, status_code)
}

/// Request handler for all requests that were rejected previously.
///
/// # Arguments
/// - `error`: Reasons for why this request was rejected by all routes.
async fn handle_rejection(error: warp::Rejection)
	-> Result<warp::reply::Response, std::convert::Infallible>
{
	let (status_code, message) = if error.is_not_found()
	{
		(warp::http::StatusCode::NOT_FOUND, "not found")
	}
	else
	{
		log::error!("unhandled rejection: {:#?}", error);

		(warp::http::StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MESSAGE)
	};

	Ok(json_response(&ErrorResponse{error: message, ..Default::default()}, status_code))
}

/// Serialize a response body to JSON and attach the status code.
fn json_response<T>(body: &T, status_code: warp::http::StatusCode) -> warp::reply::Response
where
	T: serde::Serialize,
{
	use warp::Reply as _;

	warp::reply::with_status(warp::reply::json(body), status_code).into_response()
}
