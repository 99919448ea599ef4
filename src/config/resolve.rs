//! Resolution of the general settings from the environment.

use super::env::Environment;
use super::scheme::Scheme;
use super::settings::{GeneralSettings, DEFAULT_MAX_UPLOAD_FILE_SIZE};

pub const ENV_DEV_MODE: &str = "CRAFT_DEVMODE";
pub const ENV_TEST_EMAIL: &str = "CRAFT_TEST_EMAIL";
pub const ENV_SITE_URL: &str = "CRAFT_SITEURL";

/// Resolves the general settings from `env`.
///
/// `siteUrl` is the detected scheme, `://`, then `CRAFT_SITEURL` verbatim. Nothing
/// is validated: an unset `CRAFT_SITEURL` yields `"http://"` (or `"https://"`),
/// and downstream consumers are expected to check it.
///
/// ```
/// use craft_config::{resolve, MapEnv};
///
/// let env = MapEnv::new()
///     .with_https("on")
///     .with_var("CRAFT_SITEURL", "example.com");
/// assert_eq!(resolve(&env).site_url, "https://example.com");
/// ```
pub fn resolve<E: Environment + ?Sized>(env: &E) -> GeneralSettings {
    let scheme = Scheme::detect(env);

    GeneralSettings {
        omit_script_name_in_urls: true,
        max_upload_file_size: DEFAULT_MAX_UPLOAD_FILE_SIZE,
        dev_mode: env.get_bool(ENV_DEV_MODE, false),
        test_to_email_address: env.get_opt_string(ENV_TEST_EMAIL),
        use_compressed_js: false,
        site_url: format!("{scheme}://{}", env.get_string(ENV_SITE_URL, "")),
    }
}
