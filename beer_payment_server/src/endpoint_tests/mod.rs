mod cards;
mod helpers;
mod mocks;
mod orders;
mod settlement;
