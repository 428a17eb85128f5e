
mod parse_good;
mod property_lines;
mod property_query;
