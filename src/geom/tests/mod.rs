mod test_cross_section_basic;
mod test_depth_sort_basic;
mod test_revolve_basic;
