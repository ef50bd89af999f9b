use clap::Parser;

use crate::error::{AppError, AppResult};

use super::VolleyArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<VolleyArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    VolleyArgs::try_parse_from(args).map_err(AppError::from)
}
