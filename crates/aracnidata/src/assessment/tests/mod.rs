mod common;
mod routing;
mod walker;
