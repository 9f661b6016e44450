/// Request body for the GitHub API’s *create a workflow dispatch event* endpoint.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowDispatchRequest<'a>
{
	/// The Git ref (branch or tag) to run the workflow on.
	#[serde(rename = "ref")]
	pub ref_: &'a str,
	// We don’t pass workflow inputs, so leave out the optional fields
}

/// Which of the required GitHub API credentials are configured.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CredentialPresence
{
	pub has_token: bool,
	pub has_owner: bool,
	pub has_repo: bool,
}

/// Response type acknowledging a successfully triggered workflow (serialized to JSON).
#[derive(Debug, serde::Serialize)]
pub struct SuccessResponse<'a>
{
	/// Always `true`, so that clients can check a single field.
	pub success: bool,
	/// Human-readable information about what happens next.
	pub message: &'a str,
}

/// Response type informing about errors while handling requests (serialized to JSON).
#[derive(Debug, Default, serde::Serialize)]
pub struct ErrorResponse<'a>
{
	/// Error message with a human-readable explanation as to why this request failed.
	pub error: &'a str,
	/// Response body returned by the GitHub API if it rejected the request.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
	/// HTTP status code returned by the GitHub API if it rejected the request.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
	/// Description of an unexpected error.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Which credentials are configured, if some are missing.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub debug: Option<CredentialPresence>,
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn dispatch_request_uses_ref_key()
	{
		let body = serde_json::to_value(WorkflowDispatchRequest{ref_: "main"}).unwrap();

		assert_eq!(body, serde_json::json!({"ref": "main"}));
	}

	#[test]
	fn error_response_omits_absent_fields()
	{
		let body = serde_json::to_value(ErrorResponse{error: "Method not allowed", ..Default::default()})
			.unwrap();

		assert_eq!(body, serde_json::json!({"error": "Method not allowed"}));
	}
}
