/// All errors that may occur during initialization or while handling requests.
#[derive(Debug, thiserror::Error)]
pub enum Error
{
	#[error("could not parse listen address")]
	ParseListenAddress(#[source] std::net::AddrParseError),

	#[error("could not create HTTP client")]
	CreateHttpClient(#[source] reqwest::Error),

	#[error("GitHub API credentials are not configured")]
	MissingCredentials(crate::CredentialPresence),

	#[error("could not parse URL")]
	ParseUrl(#[source] url::ParseError),
	#[error("could not make GitHub API request")]
	MakeGitHubApiRequest(#[source] reqwest::Error),
	#[error("GitHub API rejected workflow dispatch (status code {status_code}): {response_body}")]
	WorkflowDispatchRejected
	{
		status_code: reqwest::StatusCode,
		response_body: String,
	},
}
