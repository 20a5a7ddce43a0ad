mod test_count_display;
mod test_initialize;
