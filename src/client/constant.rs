pub const SITE_NAME: &str = "CloudPanel";
