pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const PROFILE_PATH: &str = "/auth/profile/";
pub const USER_INFO_PATH: &str = "/timesheets/user-info/";
pub const USERS_PATH: &str = "/auth/users/";

pub const MY_PROJECTS_PATH: &str = "/accounts/my-projects/";
pub const MY_TIMESHEETS_PATH: &str = "/timesheets/my-timesheets/";
pub const TIMESHEETS_PATH: &str = "/timesheets/";
pub const SUBMIT_WEEK_PATH: &str = "/timesheets/submit-week/";
pub const PROJECTS_PATH: &str = "/projects/";
