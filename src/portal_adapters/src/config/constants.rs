pub mod env {
    pub const ENV_PREFIX: &str = "PORTAL";
    pub const ENV_SEPARATOR: &str = "__";
    pub const CONFIG_FILE: &str = "config/portal";
}

pub mod routes {
    pub const GATE: &str = "/";
    pub const BEGIN_FEDERATED: &str = "/auth/federated";
    pub const FEDERATED_CALLBACK: &str = "/auth/callback";
    pub const REGISTER: &str = "/register";
    pub const DASHBOARD: &str = "/dashboard";
    pub const DASHBOARD_EVENTS: &str = "/dashboard/events";
    pub const LOGOUT: &str = "/logout";
    pub const ASSETS: &str = "/assets";

    pub const GATE_SIGNED_OUT: &str = "/?notice=signed_out";
    pub const GATE_SESSION_ENDED: &str = "/?notice=session_ended";
    pub const DASHBOARD_SIGNED_IN: &str = "/dashboard?notice=signed_in";
}

pub mod cookies {
    pub const SESSION_COOKIE_NAME: &str = "portal_session";
    pub const STATE_COOKIE_NAME: &str = "portal_oauth_state";
    pub const GATE_COOKIE_NAME: &str = "portal_gate";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const ASSETS_DIR: &str = "assets";

    pub mod identity_provider {
        pub const BASE_URL: &str = "http://localhost:9999/";
        pub const PROVIDER: &str = "google";
        pub const REDIRECT_URL: &str = "http://localhost:3000/auth/callback";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
        pub const POLL_INTERVAL_SECS: u64 = 30;
    }

    pub mod registration {
        pub const URL: &str = "http://localhost:8080/registration-requests";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod http_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
