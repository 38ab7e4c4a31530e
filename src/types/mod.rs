pub mod city;
pub mod rejected_row;
pub mod time_unit;
pub mod time_window;
pub mod weather_icon;
pub mod weather_record;
