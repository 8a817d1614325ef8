pub mod d402_inventory_intelligence;
