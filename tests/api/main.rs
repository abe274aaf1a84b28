mod health_check;
mod refresh;
mod submissions;
