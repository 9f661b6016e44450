/// Configuration of the GitHub API client.
///
/// The credentials are optional at this point. A missing value is only an error once a request
/// needs it, so that the service can start up and report the problem to its callers.
pub struct Config
{
	/// The base URL of the GitHub API server with a trailing slash (`GITHUB_API_BASE_URL`,
	/// default: <https://api.github.com/>).
	base_url: url::Url,
	/// Personal access token with permission to trigger workflows (`GITHUB_TOKEN`).
	token: Option<secstr::SecUtf8>,
	/// The user or organization owning the repository (`GITHUB_OWNER`).
	owner: Option<String>,
	/// The name of the repository containing the workflow (`GITHUB_REPO`).
	repository: Option<String>,
}

impl Config
{
	/// Read the GitHub API configuration from environment-like variables.
	///
	/// # Arguments
	/// `lookup`: Returns the value of a variable by name, or `None` if it is unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
	where
		F: Fn(&str) -> Option<String>
	{
		let base_url = match non_empty(lookup("GITHUB_API_BASE_URL"))
		{
			Some(mut base_url) =>
			{
				// Without a trailing slash, joining an endpoint would replace the last path segment
				if !base_url.ends_with('/')
				{
					base_url.push('/');
				}

				url::Url::parse(&base_url).map_err(crate::Error::ParseUrl)?
			},
			None => github_com_api_base_url(),
		};

		Ok(Self
		{
			base_url,
			token: non_empty(lookup("GITHUB_TOKEN")).map(secstr::SecUtf8::from),
			owner: non_empty(lookup("GITHUB_OWNER")),
			repository: non_empty(lookup("GITHUB_REPO")),
		})
	}

	/// Borrow the token, owner, and repository if all of them are configured.
	pub fn credentials(&self) -> Result<Credentials<'_>, crate::CredentialPresence>
	{
		match (&self.token, &self.owner, &self.repository)
		{
			(Some(token), Some(owner), Some(repository)) => Ok(Credentials
			{
				token: token.unsecure(),
				owner,
				repository,
			}),
			(token, owner, repository) => Err(crate::CredentialPresence
			{
				has_token: token.is_some(),
				has_owner: owner.is_some(),
				has_repo: repository.is_some(),
			}),
		}
	}
}

/// The complete set of credentials needed to trigger a workflow.
pub struct Credentials<'a>
{
	pub token: &'a str,
	pub owner: &'a str,
	pub repository: &'a str,
}

#[doc(hidden)]
fn github_com_api_base_url() -> url::Url
{
	url::Url::parse("https://api.github.com/")
		.expect("this call is infallible because we know the URL to be well-formed")
}

/// Treat empty variables the same as unset ones.
pub(crate) fn non_empty(value: Option<String>) -> Option<String>
{
	value.filter(|value| !value.is_empty())
}

/// A GitHub API client that authenticates with a personal access token.
///
/// Every call results in exactly one HTTP request. Nothing is retried or cached, so triggering the
/// same workflow twice dispatches it twice.
///
/// The client can safely be shared between threads and request handlers.
#[derive(Clone)]
pub struct Client
{
	#[doc(hidden)]
	config: std::sync::Arc<Config>,
	#[doc(hidden)]
	reqwest_client: reqwest::Client,
}

impl Client
{
	/// Initialize a new GitHub API client with a given configuration.
	pub fn from_config(config: Config) -> Result<Self, crate::Error>
	{
		if let Err(presence) = config.credentials()
		{
			log::warn!("GitHub API credentials are incomplete (token: {}, owner: {}, repository: \
				{}), workflow dispatches will fail until they are configured", presence.has_token,
				presence.has_owner, presence.has_repo);
		}

		let reqwest_client = reqwest::ClientBuilder::new()
			// GitHub requires a user agent and uses it to identify the caller when debugging
			.user_agent(USER_AGENT)
			.build().map_err(crate::Error::CreateHttpClient)?;

		Ok(Self
		{
			config: std::sync::Arc::new(config),
			reqwest_client,
		})
	}

	/// Trigger a `workflow_dispatch` event for a workflow in the configured repository.
	///
	/// Succeeds only if GitHub answers with 204 No Content.
	///
	/// # Arguments
	/// - `workflow_file`: File name of the workflow below `.github/workflows/`.
	/// - `body`: The Git ref to run the workflow on.
	pub async fn dispatch_workflow(&self, workflow_file: &str, body: &crate::WorkflowDispatchRequest<'_>)
		-> Result<(), crate::Error>
	{
		let credentials = self.config.credentials().map_err(crate::Error::MissingCredentials)?;

		let endpoint = format!("repos/{}/{}/actions/workflows/{workflow_file}/dispatches",
			credentials.owner, credentials.repository);
		let url = self.config.base_url.join(&endpoint).map_err(crate::Error::ParseUrl)?;

		log::debug!("dispatching workflow “{workflow_file}” on ref “{}” via {url}", body.ref_);

		let response = self.reqwest_client.post(url)
			// Personal access tokens use the `token` scheme rather than `Bearer`
			.header(reqwest::header::AUTHORIZATION, format!("token {}", credentials.token))
			// Request the v3 REST API, as recommended by GitHub’s documentation
			.header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
			.json(body)
			.send().await.map_err(crate::Error::MakeGitHubApiRequest)?;

		let status_code = response.status();

		if status_code == reqwest::StatusCode::NO_CONTENT
		{
			return Ok(());
		}

		// Keep the body for debugging purposes
		let response_body = response.text().await.map_err(crate::Error::MakeGitHubApiRequest)?;

		Err(crate::Error::WorkflowDispatchRejected{status_code, response_body})
	}
}

/// User agent sent with every GitHub API request.
pub const USER_AGENT: &str = "Stock-Price-Updater";
