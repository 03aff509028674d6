use crate::graph::{
    amplify::Amplify, envelope::EnvNode, mix::Mix, node::GraphNode, through::Through,
};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn gain(self, gain: f32) -> Amplify<Self, EnvNode> {
        Amplify::new(self, EnvNode::constant(gain))
    }

    fn through<F: GraphNode>(self, filter: F) -> Through<Self, F> {
        Through::new(self, filter)
    }

    fn add<M: GraphNode>(self, source: M) -> Mix<Self, M> {
        Mix::new(self, source)
    }

    fn boxed(self) -> Box<dyn GraphNode>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: GraphNode> NodeExt for T {}
