mod schema_resolution;
mod util;
