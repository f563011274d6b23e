mod dashboard;
mod federated;
mod gate;
mod helpers;
mod registration;
