/// Top-level configuration of this application.
pub struct Config
{
	/// Configuration options specific to the GitHub API and the workflow to trigger.
	pub github_api: crate::github_api::Config,
	/// Address the HTTP server binds to (`LISTEN_ADDRESS`, default: `127.0.0.1:3000`).
	pub listen_address: std::net::SocketAddr,
}

impl Config
{
	/// Read the configuration from the process environment.
	pub fn from_env() -> Result<Self, crate::Error>
	{
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Read the configuration from an arbitrary source of environment-like variables.
	///
	/// # Arguments
	/// `lookup`: Returns the value of a variable by name, or `None` if it is unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
	where
		F: Fn(&str) -> Option<String>
	{
		let listen_address = match crate::github_api::non_empty(lookup("LISTEN_ADDRESS"))
		{
			Some(listen_address) => listen_address.parse()
				.map_err(crate::Error::ParseListenAddress)?,
			None => default_listen_address(),
		};

		let github_api = crate::github_api::Config::from_lookup(&lookup)?;

		Ok(Self
		{
			github_api,
			listen_address,
		})
	}
}

#[doc(hidden)]
fn default_listen_address() -> std::net::SocketAddr
{
	std::net::SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn lookup_from<'a>(variables: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a
	{
		move |name: &str| variables.iter()
			.find(|(key, _)| *key == name)
			.map(|(_, value)| value.to_string())
	}

	#[test]
	fn defaults_apply_to_empty_environment()
	{
		let config = Config::from_lookup(lookup_from(&[])).unwrap();

		assert_eq!(config.listen_address, default_listen_address());
		assert!(config.github_api.credentials().is_err());
	}

	#[test]
	fn listen_address_is_read_from_environment()
	{
		let config = Config::from_lookup(lookup_from(&[("LISTEN_ADDRESS", "0.0.0.0:8080")]))
			.unwrap();

		assert_eq!(config.listen_address, "0.0.0.0:8080".parse().unwrap());
	}

	#[test]
	fn malformed_listen_address_is_rejected()
	{
		let result = Config::from_lookup(lookup_from(&[("LISTEN_ADDRESS", "localhost")]));

		assert!(matches!(result, Err(crate::Error::ParseListenAddress(_))));
	}

	#[test]
	fn malformed_base_url_is_rejected()
	{
		let result = Config::from_lookup(lookup_from(&[("GITHUB_API_BASE_URL", "not a url")]));

		assert!(matches!(result, Err(crate::Error::ParseUrl(_))));
	}
}
